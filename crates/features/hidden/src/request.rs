//! # Request Restoration
//!
//! Runs before any handler reads the request: restores the fields carried by
//! `nablarch_hidden`, then turns the parameters scoped to the submission that fired into
//! ordinary parameters.

use crate::error::HiddenError;
use crate::pack::unpack;
use formgate_domain::config::FormConfig;
use formgate_domain::constants::{
    COMPOSITE_CANDIDATE_PREFIX, COMPOSITE_KEYS_PREFIX, COMPOSITE_VARS, HIDDEN, SUBMIT,
    SUBMIT_PARAM_PREFIX, TOKEN, submit_param_field,
};
use formgate_domain::request::RequestParams;
use formgate_vault::HiddenCodec;
use std::borrow::Cow;
use tracing::{debug, instrument, trace, warn};

/// Restores the fields packed or sealed into `nablarch_hidden` and expands the parameters of
/// the submission named by `nablarch_submit`.
///
/// Values submitted directly under names that only `nablarch_hidden` may carry are discarded
/// first. When `current_request_id` requires sealing, `nablarch_hidden` must be sealed and the
/// composite-key bookkeeping may only come from it. Sealed fields replace any value the client
/// sent under the same name.
///
/// # Errors
/// [`HiddenError::TamperDetected`] if `nablarch_hidden` is repeated or plain where a seal is
/// required, [`HiddenError::MalformedPack`] for a broken plain pack, and
/// [`HiddenError::Codec`] if the sealed value cannot be opened.
#[instrument(skip(params, config, codec))]
pub fn unpack_request(
    params: &mut RequestParams,
    current_request_id: &str,
    config: &FormConfig,
    codec: &dyn HiddenCodec,
) -> Result<(), HiddenError> {
    let seal_required = config.requires_seal(current_request_id);

    discard_reserved(params, seal_required);

    let values = params.remove(HIDDEN).unwrap_or_default();
    let value = match values.as_slice() {
        [] => None,
        [value] => Some(value.as_str()),
        _ => return Err(tamper(format!("{HIDDEN} submitted {} times", values.len()))),
    };

    match value {
        Some(value) if seal_required || is_sealed(value) => {
            if !is_sealed(value) {
                return Err(tamper(format!("plain {HIDDEN} where a seal is required")));
            }
            let fields = codec.unseal(value).map_err(|source| HiddenError::Codec {
                source,
                context: Some(Cow::Borrowed("unsealing hidden fields")),
            })?;
            trace!(fields = fields.len(), "Sealed hidden fields restored");
            for field in &fields {
                params.remove(&field.name);
            }
            for field in fields {
                for value in field.values {
                    params.append(field.name.as_str(), value);
                }
            }
        },
        Some(value) => {
            let fields = unpack(value)?;
            trace!(fields = fields.len(), "Packed hidden fields restored");
            for (name, value) in fields {
                params.append(name, value);
            }
        },
        None if seal_required => debug!("No sealed hidden fields submitted"),
        None => {},
    }

    expand_submission_params(params);
    Ok(())
}

/// Turns every `hidden_submit_{X}` value into a parameter, `X` being the submission named by
/// `nablarch_submit`, then drops all `hidden_submit_*` entries so handlers never see them.
pub fn expand_submission_params(params: &mut RequestParams) {
    let submitted = params.first(SUBMIT).filter(|s| !s.is_empty()).map(submit_param_field);

    if let Some(field) = submitted {
        for entry in params.remove(&field).unwrap_or_default() {
            match entry.split_once('=') {
                Some((name, value)) => params.append(name, value),
                None => debug!(field = %field, "Dropping submission parameter without '='"),
            }
        }
    }

    params.remove_prefixed(SUBMIT_PARAM_PREFIX);
}

/// A sealed value is URL-safe base64 and never contains `=`; a non-empty plain pack always does.
fn is_sealed(value: &str) -> bool {
    !value.is_empty() && !value.contains('=')
}

fn discard_reserved(params: &mut RequestParams, seal_required: bool) {
    let forged = params.contains(TOKEN) || params.names().any(|n| n.starts_with(SUBMIT_PARAM_PREFIX));
    if forged {
        warn!("Discarding hidden-only parameters submitted outside {HIDDEN}");
    }
    params.remove(TOKEN);
    params.remove_prefixed(SUBMIT_PARAM_PREFIX);

    if seal_required {
        params.remove(COMPOSITE_VARS);
        params.remove_prefixed(COMPOSITE_KEYS_PREFIX);
        params.remove_prefixed(COMPOSITE_CANDIDATE_PREFIX);
    }
}

fn tamper(message: String) -> HiddenError {
    warn!(%message, "Hidden field tampering detected");
    HiddenError::TamperDetected { message: Cow::Owned(message), context: None }
}
