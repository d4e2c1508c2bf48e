use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chacha20poly1305::ChaCha20Poly1305;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Deref;

use crate::error::{VaultError, VaultErrorExt};

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

pub trait VaultCipher: AeadInOut + KeyInit + Send + Sync + 'static {}
impl<T: AeadInOut + KeyInit + Send + Sync + 'static> VaultCipher for T {}

// --- Payload format constants ---

/// Payload header version for [`ProtectedPayload`].
pub(crate) const PAYLOAD_VERSION_V1: u8 = 1;

/// Header layout: `[version: u8]`
pub(crate) const HEADER_LEN: usize = 1;

/// AEAD nonce length (96-bit).
pub(crate) const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub(crate) const TAG_LEN: usize = 16;

// --- Sealed content ---

/// One protected hidden field: a name and every value rendered under it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SealedField {
    pub name: String,
    pub values: Vec<String>,
}

impl SealedField {
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self { name: name.into(), values: values.into_iter().map(Into::into).collect() }
    }
}

/// The unit sealed into `nablarch_hidden`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedFields {
    pub fields: Vec<SealedField>,
}

impl Tagged for SealedFields {
    const TAG: &'static str = "formgate.hidden.v1";
}

impl VaultSerde for SealedFields {}

// --- Container ---

/// An encrypted container for protected data.
///
/// ```text
/// [V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
/// ```
///
/// The `C` parameter pins the payload to the cipher that produced it.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProtectedPayload<C = Aes> {
    pub(crate) data: Vec<u8>,
    #[serde(skip)]
    _cipher: PhantomData<C>,
}

impl<C> std::fmt::Debug for ProtectedPayload<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectedPayload").field("len", &self.data.len()).finish()
    }
}

impl<C> PartialEq for ProtectedPayload<C> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<C> Eq for ProtectedPayload<C> {}

impl<C> ProtectedPayload<C> {
    /// Returns the payload format version.
    #[must_use]
    pub fn version(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Splits the payload into `(header, nonce, ciphertext, tag)`.
    ///
    /// Returns `None` when the payload is shorter than the fixed framing.
    #[must_use]
    pub fn split(&self) -> Option<(&[u8], &[u8], &[u8], &[u8])> {
        if self.data.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
            return None;
        }
        let (header, rest) = self.data.split_at(HEADER_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);
        Some((header, nonce, ciphertext, tag))
    }

    /// Returns the raw sealed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Encodes the payload for transport inside a form field.
    #[must_use]
    pub fn to_field_value(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.data)
    }

    /// Decodes a payload previously produced by [`ProtectedPayload::to_field_value`].
    ///
    /// # Errors
    /// Returns [`VaultError::Encoding`] if the text is not URL-safe base64.
    pub fn from_field_value(value: &str) -> Result<Self, VaultError> {
        let data = URL_SAFE_NO_PAD.decode(value).context("Decoding sealed hidden field")?;
        Ok(Self::from(data))
    }
}

impl<C> AsRef<[u8]> for ProtectedPayload<C> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<C> Deref for ProtectedPayload<C> {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<C> From<Vec<u8>> for ProtectedPayload<C> {
    fn from(data: Vec<u8>) -> Self {
        Self { data, _cipher: PhantomData }
    }
}

/// Binds a sealed type to its associated data.
pub trait Tagged {
    const TAG: &'static str;
}

/// Marker trait for types that support vault serialization.
pub trait VaultSerde: Serialize + DeserializeOwned + Tagged {}
