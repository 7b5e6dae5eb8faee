//! Folding a requested quantity into a cart's lines.

use crate::domain::CartLine;

/// Returns `lines` with `quantity` of `product_id` added.
///
/// An existing line for the product grows in place; otherwise a new line is
/// appended. The input is left untouched. Quantities saturate at `u32::MAX`.
pub fn merge(lines: &[CartLine], product_id: u64, quantity: u32) -> Vec<CartLine> {
    let mut merged = lines.to_vec();
    match merged.iter_mut().find(|line| line.product_id == product_id) {
        Some(line) => line.quantity = line.quantity.saturating_add(quantity),
        None => merged.push(CartLine::new(product_id, quantity)),
    }
    merged
}
