//! # Hidden Field Plan
//!
//! Decides, once per form, how its hidden fields are emitted.
//!
//! The token and per-submission parameters always travel inside `nablarch_hidden`. Fields the
//! caller flagged as protected join them only when the form must be sealed, which is the case
//! when encryption is enabled and at least one request id the form can submit to is not
//! exempt. A sealed `nablarch_hidden` is opaque; an unsealed one is a plain pack.

use crate::error::HiddenError;
use crate::pack::pack;
use formgate_domain::config::FormConfig;
use formgate_domain::constants::{
    HIDDEN, HIDDEN_PROTECTED, POST_RESUBMIT_PREVENT, POST_RESUBMIT_PREVENT_VALUE, SUBMIT, TOKEN,
    submit_param_field,
};
use formgate_domain::form::{FormState, HiddenField};
use formgate_vault::{HiddenCodec, SealedField};
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::{debug, instrument};

/// Returns `true` if `form` must carry its protected fields sealed.
#[must_use]
pub fn requires_seal(form: &FormState, config: &FormConfig) -> bool {
    config.hidden_encryption && form.request_ids_involved.iter().any(|id| !config.is_exempt(id))
}

/// Builds the final ordered hidden fields of `form`.
///
/// `nablarch_submit` always comes first. The `nablarch_hidden` entry takes the position of the
/// first field it absorbed; everything else keeps its render order.
///
/// # Errors
/// [`HiddenError::Codec`] if sealing fails.
#[instrument(skip_all, fields(form = %form.form_name))]
pub fn plan(
    form: &FormState,
    config: &FormConfig,
    codec: &dyn HiddenCodec,
) -> Result<Vec<(String, String)>, HiddenError> {
    let seal = requires_seal(form, config);

    let mut out = vec![(SUBMIT.to_owned(), String::new())];
    let mut absorbed: Vec<(Cow<'_, str>, Cow<'_, str>)> = Vec::new();
    let mut slot = None;

    for field in raw_fields(form) {
        if field.always_packed || (seal && field.protected) {
            slot.get_or_insert(out.len());
            absorbed.push((field.name, field.value));
        } else {
            out.push((field.name.into_owned(), field.value.into_owned()));
        }
    }

    if let Some(slot) = slot {
        let value = if seal {
            codec.seal(&group(&absorbed)).map_err(|source| HiddenError::Codec {
                source,
                context: Some(Cow::Owned(format!("sealing {} fields", absorbed.len()))),
            })?
        } else {
            pack(absorbed.iter().map(|(n, v)| (n, v)))
        };
        out.insert(slot, (HIDDEN.to_owned(), value));
    }

    if form.post_resubmit_prevent {
        out.push((POST_RESUBMIT_PREVENT.to_owned(), POST_RESUBMIT_PREVENT_VALUE.to_owned()));
    }

    if config.protection_marker && form.hidden_fields.iter().any(|f| f.protected) {
        out.push((HIDDEN_PROTECTED.to_owned(), String::new()));
    }

    debug!(sealed = seal, packed = absorbed.len(), emitted = out.len(), "Hidden fields planned");
    Ok(out)
}

struct RawField<'a> {
    name: Cow<'a, str>,
    value: Cow<'a, str>,
    protected: bool,
    always_packed: bool,
}

/// Token first, then caller fields in render order, then per-submission parameters.
fn raw_fields(form: &FormState) -> impl Iterator<Item = RawField<'_>> {
    let token = form.token.iter().map(|token| RawField {
        name: Cow::Borrowed(TOKEN),
        value: Cow::Borrowed(token),
        protected: true,
        always_packed: true,
    });

    let caller = form.hidden_fields.iter().map(|HiddenField { name, value, protected }| RawField {
        name: Cow::Borrowed(name),
        value: Cow::Borrowed(value),
        protected: *protected,
        always_packed: false,
    });

    let submissions = form.submissions.iter().flat_map(|info| {
        info.extra_params.iter().map(move |(param, value)| RawField {
            name: Cow::Owned(submit_param_field(&info.name)),
            value: Cow::Owned(format!("{param}={value}")),
            protected: true,
            always_packed: true,
        })
    });

    token.chain(caller).chain(submissions)
}

/// Merges every equally named field into one entry, keeping first-seen order of names and
/// render order of values.
fn group(fields: &[(Cow<'_, str>, Cow<'_, str>)]) -> Vec<SealedField> {
    let mut grouped: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (name, value) in fields {
        grouped.entry(name.as_ref()).or_default().push(value.to_string());
    }
    grouped.into_iter().map(|(name, values)| SealedField::new(name, values)).collect()
}
