#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the formgate workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! formgate-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// Every crate in the workspace reports failures through one enum annotated with this macro,
/// so errors carry the same shape everywhere: a human-readable payload plus an optional
/// `context` that callers attach on the way up.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext` trait adding `.context(...)` to `Result<T, ErrorName>` and to
///   `Result<T, Source>` for every variant wrapping a source error.
/// * `From<Source>` for variants with a `source` field (or a `#[source]`/`#[from]` field).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Variants must use named fields.
/// 3. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 4. Variants wrapping a source error must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use formgate_derive::formgate_error;
/// use std::borrow::Cow;
///
/// #[formgate_error]
/// pub enum CodecError {
///     #[error("Decode error{}: {source}", format_context(.context))]
///     Decode { source: base64::DecodeError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal codec error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(raw: &str) -> Result<Vec<u8>, CodecError> {
///     URL_SAFE_NO_PAD.decode(raw).context("Decoding hidden blob")
/// }
/// ```
#[proc_macro_attribute]
pub fn formgate_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
