use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Deployment-wide protocol settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfigInner {
    /// Global switch for sealing protected hidden fields.
    pub hidden_encryption: bool,
    /// Request ids whose forms never require sealing.
    pub exempt_request_ids: Vec<String>,
    /// Emit the `nablarch_hidden_protected` marker on forms holding protected fields.
    pub protection_marker: bool,
    pub vault: VaultConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into every request.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FormConfig {
    #[serde(flatten, default)]
    inner: Arc<FormConfigInner>,
}

impl FormConfig {
    /// Returns `true` if forms targeting `request_id` never require sealing.
    #[must_use]
    pub fn is_exempt(&self, request_id: &str) -> bool {
        self.exempt_request_ids.iter().any(|id| id == request_id)
    }

    /// Returns `true` if a request to `request_id` must carry sealed hidden fields.
    #[must_use]
    pub fn requires_seal(&self, request_id: &str) -> bool {
        self.hidden_encryption && !self.is_exempt(request_id)
    }
}

impl From<FormConfigInner> for FormConfig {
    fn from(inner: FormConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for FormConfig {
    type Target = FormConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FormConfig {
    fn deref_mut(&mut self) -> &mut FormConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Key material for the hidden-field vault. Every node of a deployment must share it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub secret: String,
    pub salt: String,
}

// --- Default ---

impl Default for FormConfigInner {
    fn default() -> Self {
        Self {
            hidden_encryption: true,
            exempt_request_ids: Vec::new(),
            protection_marker: false,
            vault: VaultConfig::default(),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self { secret: "dev-only-change-me".to_owned(), salt: "formgate".to_owned() }
    }
}
