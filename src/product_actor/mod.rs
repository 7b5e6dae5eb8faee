//! Product catalog rules: creation, field-level update policy, and error mapping.

pub mod entity;
pub mod error;

pub use error::*;
