//! Shared infrastructure: error types and XML helpers.

pub mod error;
pub(crate) mod xml;

pub use error::{Error, Result};
