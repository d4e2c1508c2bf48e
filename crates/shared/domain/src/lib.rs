//! # Domain Models
//!
//! Pure data types shared by every protocol slice: what a rendered form remembers about its
//! submissions and hidden fields, how a submitted request is represented, and the wire
//! vocabulary both sides agree on. Keep it lean: no I/O, no crypto, no encoding logic.

pub mod composite;
pub mod config;
pub mod constants;
pub mod form;
pub mod request;
pub mod submission;
