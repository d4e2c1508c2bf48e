//! Hidden-field slice.
//!
//! At render time [`plan`] decides which hidden fields of a form travel in the clear, which are
//! packed into the single `nablarch_hidden` field, and whether that field is sealed. On the way
//! back [`unpack_request`] restores the packed fields into the request parameters and expands
//! the parameters scoped to the submission that actually fired.

mod error;
pub mod pack;
pub mod plan;
pub mod request;

pub use crate::error::{HiddenError, HiddenErrorExt};
pub use crate::pack::{pack, unpack};
pub use crate::plan::plan;
pub use crate::request::{expand_submission_params, unpack_request};
pub use formgate_kernel::request_id::request_id_of;
