pub use crate::config::{ConfigError, ConfigErrorExt, load_config};
pub use crate::request_id::request_id_of;
pub use crate::resolve::{PropertyPath, ResolveError, Resolvable, Resolved, ToResolved, resolve_path};
pub use crate::safe_nanoid;
pub use crate::token::{TokenError, TokenIssuer, verify_token};
