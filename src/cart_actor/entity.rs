use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Cart, CartCreate};
use super::actions::{CartAction, CartActionResult};
use super::aggregator;

impl Entity for Cart {
    type Id = u64;
    type CreateParams = CartCreate;
    type Patch = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;

    fn id(&self) -> &u64 { &self.id }

    fn from_create_params(id: u64, _params: CartCreate) -> Result<Self, FrameworkError> {
        Ok(Self { id, lines: Vec::new() })
    }

    /// Carts have no replaceable fields; lines change through [`CartAction`].
    fn on_update(&mut self, _patch: ()) -> Result<(), FrameworkError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, FrameworkError> {
        match action {
            CartAction::AddProduct { product_id, quantity } => {
                if quantity == 0 {
                    return Err(FrameworkError::Validation("quantity must be positive".to_string()));
                }
                self.lines = aggregator::merge(&self.lines, product_id, quantity);
                Ok(CartActionResult::AddProduct(self.lines.clone()))
            }
        }
    }
}
