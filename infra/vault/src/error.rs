//! # Vault Errors
//!
//! [`VaultError`] covers every way sealing or unsealing hidden fields can fail. All of them
//! are hard failures for the request: a forged or corrupted blob must never be treated as
//! an empty one.

use std::borrow::Cow;

#[formgate_derive::formgate_error]
pub enum VaultError {
    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the decryption process.
    ///
    /// This usually indicates a different deployment key, a mismatched AAD, or tampered data.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during Postcard serialization or deserialization.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: postcard::Error, context: Option<Cow<'static, str>> },

    /// The sealed text is not valid URL-safe base64.
    #[error("Encoding error{}: {source}", format_context(.context))]
    Encoding { source: base64::DecodeError, context: Option<Cow<'static, str>> },

    /// Failure when the vault or builder is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The payload is malformed, truncated or of an unknown version.
    #[error("Invalid payload{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
