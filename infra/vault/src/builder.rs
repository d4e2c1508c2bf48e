use crate::engine::{Vault, VaultInner};
use crate::error::VaultError;
use crate::types::{Aes, VaultCipher};
use aead::Key;
use hkdf::Hkdf;
use private::Sealed;
use sha2::Sha256;
use std::marker::PhantomData;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// HKDF info label for the hidden-field key. Bump the version to rotate every deployment.
const HIDDEN_KEY_INFO: &[u8] = b"formgate.v1.hidden";

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoKey;
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct WithKey {
    key: [u8; 32],
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for the [`Vault`].
///
/// Key material is wiped from memory as soon as the builder is consumed or dropped.
#[allow(private_bounds)]
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct VaultBuilder<C: VaultCipher = Aes, K: Sealed + ZeroizeOnDrop = NoKey> {
    #[zeroize(skip)]
    _cipher: PhantomData<C>,
    key: K,
}

impl<C: VaultCipher> Default for VaultBuilder<C> {
    fn default() -> Self {
        Self { _cipher: PhantomData, key: NoKey }
    }
}

impl<C: VaultCipher> VaultBuilder<C> {
    /// Creates a new empty builder.
    #[must_use = "Builder must be given a key before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the sealing key with HKDF-SHA256.
    ///
    /// Every node of one deployment must use the same `secret` and `salt`, otherwise forms
    /// rendered by one node cannot be submitted to another.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the secret is empty or expansion fails.
    pub fn derived_keys(
        self,
        secret: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
    ) -> Result<VaultBuilder<C, WithKey>, VaultError> {
        if secret.as_ref().is_empty() {
            return Err(VaultError::InvalidConfiguration {
                message: "Hidden-field secret cannot be empty".into(),
                context: None,
            });
        }

        let (_, hk) = Hkdf::<Sha256>::extract(Some(salt.as_ref()), secret.as_ref());
        let mut key = [0u8; 32];

        hk.expand(HIDDEN_KEY_INFO, &mut key).map_err(|_| VaultError::InvalidConfiguration {
            message: "HKDF expansion failed for hidden-field key".into(),
            context: None,
        })?;

        Ok(VaultBuilder { _cipher: PhantomData, key: WithKey { key } })
    }

    /// Uses a raw 256-bit key, e.g. one provisioned by a secret manager.
    #[must_use]
    pub fn raw_key(self, key: [u8; 32]) -> VaultBuilder<C, WithKey> {
        VaultBuilder { _cipher: PhantomData, key: WithKey { key } }
    }
}

impl<C: VaultCipher> VaultBuilder<C, WithKey> {
    /// Finalizes vault construction and zeroes the builder.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the key does not fit the cipher.
    pub fn build(mut self) -> Result<Vault<C>, VaultError> {
        let key = Key::<C>::try_from(&self.key.key[..]).map_err(|_| {
            VaultError::InvalidConfiguration {
                message: format!("Invalid key length {}, must be 32 bytes", self.key.key.len())
                    .into(),
                context: Some("Hidden".into()),
            }
        })?;
        let inner = VaultInner { cipher: C::new(&key) };

        self.zeroize();

        Ok(Vault { inner: Arc::new(inner) })
    }
}
