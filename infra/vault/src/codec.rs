use crate::engine::Vault;
use crate::error::VaultError;
use crate::types::{SealedField, VaultCipher};

/// Seals and unseals the protected hidden fields of one form.
///
/// Contract: `unseal(seal(fields))` reproduces `fields` with the same order, names and
/// values, or fails explicitly. A failure is never silently mapped to "no fields".
pub trait HiddenCodec: std::fmt::Debug + Send + Sync {
    /// Seals `fields` into an opaque value safe to place in a form field.
    ///
    /// # Errors
    /// Returns a [`VaultError`] if serialization or encryption fails.
    fn seal(&self, fields: &[SealedField]) -> Result<String, VaultError>;

    /// Restores the fields sealed into `value`.
    ///
    /// # Errors
    /// Returns a [`VaultError`] for malformed, forged or foreign values.
    fn unseal(&self, value: &str) -> Result<Vec<SealedField>, VaultError>;
}

impl<C: VaultCipher> HiddenCodec for Vault<C> {
    fn seal(&self, fields: &[SealedField]) -> Result<String, VaultError> {
        self.seal_fields(fields)
    }

    fn unseal(&self, value: &str) -> Result<Vec<SealedField>, VaultError> {
        self.unseal_fields(value)
    }
}
