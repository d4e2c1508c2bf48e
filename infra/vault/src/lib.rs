//! Authenticated sealing for protected hidden form fields.
//!
//! A rendered form may carry values the server must get back unmodified: the resubmission
//! token, per-submission parameters and the candidate rows of composite keys. When sealing is
//! required those values are collected into one ordered list of `(name, values)` pairs and
//! handed to a [`HiddenCodec`], which turns them into a single opaque string placed in the
//! `nablarch_hidden` field. On the next request the same codec reverses the process or fails
//! explicitly.
//!
//! [`Vault`] is the AEAD-backed codec used in production.
//!
//! ## Payload Format
//!
//! ```text
//! [V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The binary payload is encoded with URL-safe base64 without padding, so the sealed value
//! never contains `=` or `|` and is distinguishable from the plain pack format.
//!
//! ## Nonce Policy
//!
//! Every seal draws a fresh random 96-bit nonce from the system RNG.
//!
//! ## No Compression
//!
//! Sealed blobs travel to the browser, so their length is attacker-observable while parts of
//! the plaintext (submitted values echoed back) are attacker-influenced. Payloads are never
//! compressed before encryption.
//!
//! ## Example
//!
//! ```rust
//! use formgate_vault::prelude::*;
//!
//! # fn main() -> Result<(), VaultError> {
//! let vault = Vault::<Aes>::builder().derived_keys("deployment-secret", "salt")?.build()?;
//!
//! let fields = vec![
//!     SealedField::new("nablarch_token", ["t0k3n"]),
//!     SealedField::new("hidden_submit_login", ["user.id=42"]),
//! ];
//!
//! let sealed = vault.seal_fields(&fields)?;
//! assert!(!sealed.contains('='));
//!
//! let restored = vault.unseal_fields(&sealed)?;
//! assert_eq!(fields, restored);
//! # Ok(())
//! # }
//! ```

mod builder;
mod codec;
mod engine;
mod error;
mod types;

pub use builder::VaultBuilder;
pub use codec::HiddenCodec;
pub use engine::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use types::{ProtectedPayload, SealedField, SealedFields, Tagged, VaultSerde};

pub mod prelude {
    pub use crate::codec::HiddenCodec;
    pub use crate::engine::Vault;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::types::{Aes, ChaCha, ProtectedPayload, SealedField, SealedFields, Tagged};
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
