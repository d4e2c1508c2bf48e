use aead::Nonce;
use aead::inout::InOutBuf;
use getrandom::fill;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::builder::VaultBuilder;
use crate::error::{VaultError, VaultErrorExt};
use crate::types::{
    Aes, HEADER_LEN, NONCE_LEN, PAYLOAD_VERSION_V1, ProtectedPayload, SealedField, SealedFields,
    TAG_LEN, Tagged, VaultCipher, VaultSerde,
};

#[allow(unreachable_pub, missing_debug_implementations)]
pub struct VaultInner<C = Aes>
where
    C: VaultCipher,
{
    pub cipher: C,
}

/// A thread-safe handle for sealing protected hidden fields.
///
/// The cipher lives behind an [`Arc`], so one vault built at startup is cloned cheaply into
/// every request.
///
/// ### Generic Parameters
/// * `C`: The cipher implementation. Defaults to [`Aes`] (AES-256-GCM).
pub struct Vault<C = Aes>
where
    C: VaultCipher,
{
    pub(crate) inner: Arc<VaultInner<C>>,
}

impl<C: VaultCipher> std::fmt::Debug for Vault<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault").field("cipher", &std::any::type_name::<C>()).finish_non_exhaustive()
    }
}

impl<C: VaultCipher> Clone for Vault<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C> Vault<C>
where
    C: VaultCipher,
{
    /// Returns a new [`VaultBuilder`] to configure the vault.
    #[must_use]
    pub fn builder() -> VaultBuilder<C> {
        VaultBuilder::<C>::new()
    }

    fn next_nonce() -> Result<Nonce<C>, VaultError> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).map_err(|e| VaultError::Encryption {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for nonce generation".into()),
        })?;
        Ok(nonce)
    }

    /// Seals a value using `postcard`, binding it to [`Tagged::TAG`].
    ///
    /// # Errors
    /// * [`VaultError::Serialization`] If the value cannot be serialized.
    /// * [`VaultError::Encryption`] If the AEAD encryption fails.
    pub fn seal<T: VaultSerde>(&self, data: &T) -> Result<ProtectedPayload<C>, VaultError> {
        let bytes = postcard::to_stdvec(data).context("Postcard encoding failed")?;
        self.seal_bytes(bytes, T::TAG.as_bytes())
    }

    /// Unseals and deserializes a value sealed by [`Vault::seal`].
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] If the payload is malformed.
    /// * [`VaultError::Decryption`] If the key, tag or data is invalid.
    /// * [`VaultError::Serialization`] If the decrypted bytes cannot be parsed.
    pub fn unseal<T: VaultSerde>(&self, payload: impl AsRef<[u8]>) -> Result<T, VaultError> {
        let bytes = self.unseal_bytes(payload, T::TAG.as_bytes())?;
        postcard::from_bytes(&bytes).context("Postcard decoding failed")
    }

    /// Encrypts raw bytes bound to `context` (the AEAD associated data).
    ///
    /// # Errors
    /// * [`VaultError::Encryption`] If the AEAD encryption fails.
    pub fn seal_bytes(
        &self,
        data: impl AsRef<[u8]>,
        context: &[u8],
    ) -> Result<ProtectedPayload<C>, VaultError> {
        let blob = Self::encrypt_internal(&self.inner.cipher, data.as_ref(), context)?;
        Ok(ProtectedPayload::from(blob))
    }

    /// Decrypts bytes produced by [`Vault::seal_bytes`] with the same `context`.
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] If the payload is malformed.
    /// * [`VaultError::Decryption`] If the context, key, or data is invalid.
    pub fn unseal_bytes(
        &self,
        payload: impl AsRef<[u8]>,
        context: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        Self::decrypt_internal(&self.inner.cipher, payload.as_ref(), context)
    }

    /// Seals an ordered list of hidden fields into a single form-field value.
    ///
    /// # Errors
    /// See [`Vault::seal`].
    pub fn seal_fields(&self, fields: &[SealedField]) -> Result<String, VaultError> {
        let unit = SealedFields { fields: fields.to_vec() };
        let payload = self.seal(&unit)?;
        trace!(fields = fields.len(), bytes = payload.len(), "Sealed hidden fields");
        Ok(payload.to_field_value())
    }

    /// Reverses [`Vault::seal_fields`], reproducing the original order exactly.
    ///
    /// # Errors
    /// * [`VaultError::Encoding`] If the value is not URL-safe base64.
    /// * See [`Vault::unseal`] for the remaining failure modes.
    pub fn unseal_fields(&self, value: &str) -> Result<Vec<SealedField>, VaultError> {
        let payload = ProtectedPayload::<C>::from_field_value(value)?;
        let unit: SealedFields = self.unseal(&payload).inspect_err(|e| {
            debug!(error = %e, tag = SealedFields::TAG, "Rejected sealed hidden fields");
        })?;
        Ok(unit.fields)
    }

    fn encrypt_internal(cipher: &C, data: &[u8], aad: &[u8]) -> Result<Vec<u8>, VaultError> {
        let nonce = Self::next_nonce()?;

        let mut buf = Vec::with_capacity(HEADER_LEN + NONCE_LEN + data.len() + TAG_LEN);
        buf.push(PAYLOAD_VERSION_V1);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(data);

        let (_framing, data_part) = buf.split_at_mut(HEADER_LEN + NONCE_LEN);
        let in_out = InOutBuf::from(data_part);

        let tag = cipher.encrypt_inout_detached(&nonce, aad, in_out).map_err(|_| {
            VaultError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AEAD encryption failed".into()),
            }
        })?;

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    fn decrypt_internal(cipher: &C, blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, VaultError> {
        if blob.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Payload too short ({} bytes). Expected at least {} bytes",
                    blob.len(),
                    HEADER_LEN + NONCE_LEN + TAG_LEN
                )
                .into(),
                context: None,
            });
        }

        let version = blob[0];
        if version != PAYLOAD_VERSION_V1 {
            return Err(VaultError::InvalidPayload {
                message: "Unsupported payload version".into(),
                context: Some(format!("version={version}").into()),
            });
        }

        let rest = &blob[HEADER_LEN..];
        let (nonce_slice, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag_slice) = rest.split_at(rest.len() - TAG_LEN);

        let nonce = nonce_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid nonce length".into(),
            context: None,
        })?;

        let tag = tag_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid tag length".into(),
            context: None,
        })?;

        let mut buf = ciphertext.to_vec();
        let in_out = InOutBuf::from(&mut buf[..]);

        cipher.decrypt_inout_detached(&nonce, aad, in_out, &tag).map_err(|_| {
            VaultError::Decryption {
                message: "Decryption failed".into(),
                context: Some("AEAD authentication failed".into()),
            }
        })?;

        Ok(buf)
    }
}
