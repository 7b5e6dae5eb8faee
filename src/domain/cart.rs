use serde::{Deserialize, Serialize};

/// A shopping cart. Line order is the order products were first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: u64,
    #[serde(rename = "products", default)]
    pub lines: Vec<CartLine>,
}

/// One product in a cart. A cart holds at most one line per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "product")]
    pub product_id: u64,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self { product_id, quantity }
    }
}

/// Carts are created empty; there is nothing to supply.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;
