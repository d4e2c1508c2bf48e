//! Resubmission tokens: issued while a form renders, checked once when it comes back.

use crate::domain::constants::TOKEN;
use crate::domain::request::RequestParams;
use crate::safe_nanoid;
use std::borrow::Cow;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Default token length in characters (about 185 bits over the safe alphabet).
pub const TOKEN_LENGTH: usize = 32;

#[formgate_derive::formgate_error]
pub enum TokenError {
    /// The request carries no token, or more than one.
    #[error("Token missing{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The submitted token does not match the issued one.
    #[error("Token mismatch{}: {message}", format_context(.context))]
    Mismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Issues unambiguous random tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    length: usize,
}

impl TokenIssuer {
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }

    #[must_use]
    pub fn issue(&self) -> String {
        safe_nanoid!(self.length)
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new(TOKEN_LENGTH)
    }
}

/// Checks the submitted `nablarch_token` against `expected` and removes it from `params`.
///
/// The token is consumed whatever the outcome, so a replayed request cannot retry it.
///
/// # Errors
/// [`TokenError::Missing`] if the token is absent or repeated, [`TokenError::Mismatch`] if
/// it differs from `expected`.
pub fn verify_token(params: &mut RequestParams, expected: &str) -> Result<(), TokenError> {
    let submitted = params.remove(TOKEN).unwrap_or_default();

    let [token] = submitted.as_slice() else {
        debug!(count = submitted.len(), "Rejecting request without a single token");
        return Err(TokenError::Missing {
            message: Cow::Owned(format!("expected one token, got {}", submitted.len())),
            context: None,
        });
    };

    if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        debug!("Rejecting request with a stale or forged token");
        Err(TokenError::Mismatch { message: Cow::Borrowed("token does not match"), context: None })
    }
}
