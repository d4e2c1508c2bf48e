//! Composite-key slice.
//!
//! A composite key is a selection whose value is a tuple of properties (`id,version`). The
//! form carries every candidate tuple it offered; the next request accepts a submitted tuple
//! only if it matches one of those candidates exactly, then splits it into one parameter per
//! key name. Partial or recombined tuples never reach a handler.

mod decode;
mod encode;
mod error;
mod rows;

pub use crate::decode::decode;
pub use crate::encode::{EncodedCompositeKey, encode, finalize, register};
pub use crate::error::{CompositeError, CompositeErrorExt};
pub use crate::rows::from_rows;
