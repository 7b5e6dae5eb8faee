use crate::domain::CartLine;

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` units of a product, merging with an existing line.
    ///
    /// # Errors
    /// Fails if `quantity` is zero.
    AddProduct { product_id: u64, quantity: u32 },
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The cart's lines after the product was added
    AddProduct(Vec<CartLine>),
}

/// Turns a caller-supplied quantity into a line quantity.
///
/// Absent or zero means one unit. Negative or oversized values are rejected.
pub fn normalize_quantity(requested: Option<i64>) -> Result<u32, String> {
    match requested {
        None | Some(0) => Ok(1),
        Some(q) if q < 0 => Err(format!("quantity must be positive, got {q}")),
        Some(q) => u32::try_from(q).map_err(|_| format!("quantity {q} is too large")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_zero_quantity_defaults_to_one() {
        assert_eq!(normalize_quantity(None), Ok(1));
        assert_eq!(normalize_quantity(Some(0)), Ok(1));
    }

    #[test]
    fn positive_quantity_is_kept() {
        assert_eq!(normalize_quantity(Some(7)), Ok(7));
    }

    #[test]
    fn negative_and_oversized_quantities_are_rejected() {
        assert!(normalize_quantity(Some(-2)).is_err());
        assert!(normalize_quantity(Some(i64::from(u32::MAX) + 1)).is_err());
    }
}
