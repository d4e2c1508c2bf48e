use formgate_composite::CompositeError;
use formgate_hidden::HiddenError;
use formgate_submission::SubmissionError;
use formgate_vault::VaultError;
use std::borrow::Cow;

/// A specialized [`FormError`] enum of this crate.
#[formgate_derive::formgate_error]
pub enum FormError {
    /// Two forms on one page share a name.
    #[error("Duplicate form name{}: {message}", format_context(.context))]
    DuplicateFormName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A form was opened while another one is still open.
    #[error("Nested form{}: {message}", format_context(.context))]
    NestedForm { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A control that must register into a form rendered outside of one.
    #[error("Missing form context{}: {message}", format_context(.context))]
    MissingFormContext { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Submission error{}: {source}", format_context(.context))]
    Submission { source: SubmissionError, context: Option<Cow<'static, str>> },

    #[error("Hidden field error{}: {source}", format_context(.context))]
    Hidden { source: HiddenError, context: Option<Cow<'static, str>> },

    #[error("Composite key error{}: {source}", format_context(.context))]
    Composite { source: CompositeError, context: Option<Cow<'static, str>> },

    #[error("Vault error{}: {source}", format_context(.context))]
    Vault { source: VaultError, context: Option<Cow<'static, str>> },
}
