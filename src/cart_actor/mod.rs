//! Cart-specific domain logic: line aggregation and the add-product action.

mod actions;
pub mod aggregator;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
