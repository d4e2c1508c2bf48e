//! Facade crate for the form state transfer protocol.
//! Re-exports domain/kernel primitives and composes the protocol slices into the two passes
//! an application drives: [`RenderState`] while a page renders, [`decode_request`] before a
//! handler reads the next request.
//! Keep this crate thin: it should compose other crates, not implement protocol logic.
//!
//! ## Usage
//! ```rust
//! use formgate::prelude::*;
//!
//! let config = FormConfig::default();
//! let codec = formgate::vault_from_config(&config).unwrap();
//!
//! let mut page = RenderState::new(config.clone());
//! page.open_form(Some("order")).unwrap();
//! page.register_submission(Some("save"), SubmissionTarget::transition("/app/R1.do")).unwrap();
//! let rendered = page.close_form(&codec).unwrap();
//!
//! let mut params: RequestParams = rendered.hidden_fields.iter().cloned().collect();
//! params.set("nablarch_submit", vec!["save".to_owned()]);
//! let params = decode_request(params, "R1", &config, &codec).unwrap();
//! assert!(!params.contains("nablarch_hidden"));
//! ```

mod decode;
mod error;
mod render;

pub use crate::decode::decode_request;
pub use crate::error::{FormError, FormErrorExt};
pub use crate::render::RenderState;
pub use formgate_domain as domain;
pub use formgate_kernel as kernel;
pub use formgate_vault as vault;

use formgate_domain::config::FormConfig;
use formgate_vault::{Vault, VaultError};

/// Protocol slices, for callers that need a single step rather than a full pass.
pub mod features {
    pub use formgate_composite as composite;
    pub use formgate_hidden as hidden;
    pub use formgate_submission as submission;
}

pub mod prelude {
    pub use crate::{FormError, RenderState, decode_request};
    pub use formgate_domain::composite::CompositeKeyField;
    pub use formgate_domain::config::{FormConfig, FormConfigInner};
    pub use formgate_domain::form::{FormState, RenderedForm};
    pub use formgate_domain::request::RequestParams;
    pub use formgate_domain::submission::{SubmissionTarget, SubmitAction};
    pub use formgate_kernel::token::{TokenIssuer, verify_token};
    pub use formgate_vault::{HiddenCodec, Vault};
}

/// Builds the deployment codec from the configured vault secret and salt.
///
/// # Errors
/// Returns a [`VaultError`] if the secret is empty or key derivation fails.
pub fn vault_from_config(config: &FormConfig) -> Result<Vault, VaultError> {
    Vault::builder().derived_keys(&config.vault.secret, &config.vault.salt)?.build()
}
