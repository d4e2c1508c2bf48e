use formgate_vault::VaultError;
use std::borrow::Cow;

/// A specialized [`HiddenError`] enum of this crate.
#[formgate_derive::formgate_error]
pub enum HiddenError {
    /// A plain pack that does not follow the `name=value|...` escaping rules.
    #[error("Malformed hidden pack{}: {message}", format_context(.context))]
    MalformedPack { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The submitted hidden fields cannot have been rendered by this server.
    #[error("Hidden field tampering detected{}: {message}", format_context(.context))]
    TamperDetected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Sealing or unsealing failed.
    #[error("Hidden field codec error{}: {source}", format_context(.context))]
    Codec { source: VaultError, context: Option<Cow<'static, str>> },
}
