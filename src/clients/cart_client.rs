use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::cart_actor::{normalize_quantity, CartAction, CartActionResult, CartError};
use crate::domain::{Cart, CartCreate, CartLine};

/// Client for the cart repository actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl_basic_client!(CartClient, Cart, CartError, cart);

impl CartClient {
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.create(CartCreate).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_lines(&self, cart_id: u64) -> Result<Vec<CartLine>, CartError> {
        self.get_cart(cart_id).await.map(|cart| cart.lines)
    }

    /// Adds a product to a cart and returns the cart's updated lines.
    ///
    /// `quantity` defaults to one when absent or zero; negative values are
    /// rejected before the cart is touched.
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        cart_id: u64,
        product_id: u64,
        quantity: Option<i64>,
    ) -> Result<Vec<CartLine>, CartError> {
        let quantity = normalize_quantity(quantity).map_err(CartError::ValidationError)?;
        debug!(quantity, "Sending request");
        let CartActionResult::AddProduct(lines) = self
            .inner
            .perform_action(cart_id, CartAction::AddProduct { product_id, quantity })
            .await?;
        Ok(lines)
    }
}
