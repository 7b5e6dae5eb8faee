pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
