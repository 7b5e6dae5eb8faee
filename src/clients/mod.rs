//! Typed clients wrapping the generic [`ResourceClient`](crate::actor_framework::ResourceClient).

#[macro_use]
mod macros;

mod cart_client;
mod product_client;

pub use cart_client::CartClient;
pub use product_client::{parse_limit, ProductClient};
