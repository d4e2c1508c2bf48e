//! # Render Pass
//!
//! One [`RenderState`] per rendered page. Forms open and close in document order; controls
//! rendered in between register into the open form.

use crate::error::FormError;
use formgate_domain::composite::CompositeKeyField;
use formgate_domain::config::FormConfig;
use formgate_domain::constants::FORM_NAME_PREFIX;
use formgate_domain::form::{FormState, RenderedForm};
use formgate_domain::submission::SubmissionTarget;
use formgate_kernel::token::TokenIssuer;
use formgate_vault::HiddenCodec;
use fxhash::FxHashSet;
use std::borrow::Cow;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct RenderState {
    config: FormConfig,
    tokens: TokenIssuer,
    /// Page-scoped ordinal of the last opened form.
    form_ordinal: usize,
    form_names: FxHashSet<String>,
    current: Option<FormState>,
}

impl RenderState {
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self::with_token_issuer(config, TokenIssuer::default())
    }

    #[must_use]
    pub fn with_token_issuer(config: FormConfig, tokens: TokenIssuer) -> Self {
        Self { config, tokens, form_ordinal: 0, form_names: FxHashSet::default(), current: None }
    }

    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Opens a form. A blank name becomes `nablarch_form{n}`, `n` being the page ordinal of
    /// the form.
    ///
    /// # Errors
    /// [`FormError::NestedForm`] if a form is already open, [`FormError::DuplicateFormName`]
    /// if the page already holds a form with this name.
    pub fn open_form(&mut self, name: Option<&str>) -> Result<&mut FormState, FormError> {
        if let Some(open) = &self.current {
            return Err(FormError::NestedForm {
                message: Cow::Borrowed("forms cannot be nested"),
                context: Some(Cow::Owned(open.form_name.clone())),
            });
        }

        let ordinal = self.form_ordinal + 1;
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) if self.form_names.contains(name) => {
                return Err(FormError::DuplicateFormName {
                    message: Cow::Owned(format!("form '{name}' already rendered on this page")),
                    context: None,
                });
            },
            Some(name) => name.to_owned(),
            None => (ordinal..)
                .map(|n| format!("{FORM_NAME_PREFIX}{n}"))
                .find(|candidate| !self.form_names.contains(candidate))
                .unwrap_or_default(),
        };

        self.form_ordinal = ordinal;
        debug!(form = %name, "Form opened");
        self.form_names.insert(name.clone());
        Ok(self.current.insert(FormState::new(name)))
    }

    /// The open form, for controls that must register into one.
    ///
    /// # Errors
    /// [`FormError::MissingFormContext`] outside of a form.
    pub fn current_form(&mut self) -> Result<&mut FormState, FormError> {
        self.current.as_mut().ok_or_else(|| FormError::MissingFormContext {
            message: Cow::Borrowed("control rendered outside of a form"),
            context: None,
        })
    }

    /// The open form, for decorative controls that degrade outside of one.
    pub const fn try_current_form(&mut self) -> Option<&mut FormState> {
        self.current.as_mut()
    }

    /// Registers a submit control into the open form and returns its effective name.
    ///
    /// # Errors
    /// [`FormError::MissingFormContext`] outside of a form.
    pub fn register_submission(
        &mut self,
        raw_name: Option<&str>,
        target: SubmissionTarget,
    ) -> Result<String, FormError> {
        let form = self.current_form()?;
        Ok(formgate_submission::register(form, raw_name, target))
    }

    /// Registers a composite-key field into the open form.
    ///
    /// # Errors
    /// [`FormError::MissingFormContext`] outside of a form, [`FormError::Composite`] for a
    /// malformed field.
    pub fn register_composite(&mut self, field: CompositeKeyField) -> Result<(), FormError> {
        let form = self.current_form()?;
        formgate_composite::register(form, field)?;
        Ok(())
    }

    /// Issues a resubmission token for the open form and returns it so the caller can keep
    /// it for verification.
    ///
    /// # Errors
    /// [`FormError::MissingFormContext`] outside of a form.
    pub fn issue_token(&mut self) -> Result<String, FormError> {
        let token = self.tokens.issue();
        self.current_form()?.set_token(token.clone());
        Ok(token)
    }

    /// Closes the open form and produces its hidden fields and client descriptor.
    ///
    /// # Errors
    /// [`FormError::MissingFormContext`] if no form is open, [`FormError::Hidden`] if sealing
    /// fails, [`FormError::Submission`] if the descriptor cannot be rendered.
    #[instrument(skip_all)]
    pub fn close_form(&mut self, codec: &dyn HiddenCodec) -> Result<RenderedForm, FormError> {
        let mut form = self.current.take().ok_or_else(|| FormError::MissingFormContext {
            message: Cow::Borrowed("no open form to close"),
            context: None,
        })?;

        formgate_composite::finalize(&mut form);
        let hidden_fields = formgate_hidden::plan(&form, &self.config, codec)?;
        let descriptor = formgate_submission::render(&form)?;
        let script = formgate_submission::render_script(&form)?;

        debug!(form = %form.form_name, hidden = hidden_fields.len(), submissions = form.submissions.len(), "Form closed");
        Ok(RenderedForm { form_name: form.form_name, hidden_fields, descriptor, script })
    }
}
