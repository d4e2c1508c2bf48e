//! Submission slice.
//!
//! Every submit-capable control (button, link, image) registers here while its form renders;
//! the accumulated registry is then serialized into the descriptor the client dispatcher reads
//! to decide where and how the form goes.

mod error;
pub mod registry;
pub mod script;

pub use crate::error::{SubmissionError, SubmissionErrorExt};
pub use crate::registry::{
    add_param, add_param_last, add_param_rename, add_param_rename_last, register,
};
pub use crate::script::{render, render_script};
