use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for overrides (`FORMGATE__VAULT__SECRET` maps to `vault.secret`).
pub const ENV_PREFIX: &str = "FORMGATE";

/// Custom error type for config loading.
#[formgate_derive::formgate_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file, then overlays `FORMGATE__`-prefixed environment variables.
///
/// Nested keys use double underscores: `FORMGATE__HIDDEN_ENCRYPTION=false` maps to
/// `hidden_encryption`, `FORMGATE__VAULT__SECRET` to `vault.secret`. Without a path the
/// `formgate` file in the working directory is used.
///
/// # Errors
/// Returns an error if the file cannot be found, or if the merged sources do not match `T`.
///
/// # Example
/// ```rust
/// use formgate_kernel::config::load_config;
/// use formgate_kernel::domain::config::FormConfig;
///
/// let cfg: FormConfig = load_config(Some("config/local")).unwrap_or_default();
/// assert!(cfg.hidden_encryption);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from("formgate"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("exempt_request_ids")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), "Loading form config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
