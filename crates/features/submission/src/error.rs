use std::borrow::Cow;

/// A specialized [`SubmissionError`] enum of this crate.
#[formgate_derive::formgate_error]
pub enum SubmissionError {
    /// A parameter was addressed to a submission the form never registered.
    #[error("Unknown submission{}: {message}", format_context(.context))]
    UnknownSubmission { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The descriptor could not be serialized.
    #[error("Descriptor serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
