use formgate_kernel::resolve::ResolveError;
use std::borrow::Cow;

/// A specialized [`CompositeError`] enum of this crate.
///
/// Only render-side mistakes surface here. Anomalies in a submitted request are dropped by
/// [`crate::decode`] without an error.
#[formgate_derive::formgate_error]
pub enum CompositeError {
    /// The field declaration itself is unusable (no key names, row arity mismatch).
    #[error("Invalid composite field{}: {message}", format_context(.context))]
    InvalidField { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A key name is not a valid property path.
    #[error("Invalid key path{}: {source}", format_context(.context))]
    Path { source: ResolveError, context: Option<Cow<'static, str>> },

    /// A row has no value at a key's property path, or the value is not a scalar.
    #[error("Missing property{}: {message}", format_context(.context))]
    MissingProperty { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
