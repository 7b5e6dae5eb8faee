use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::ProductError;

/// Client for the product catalog actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);
impl_client_delete!(ProductClient, Product, ProductError, product);

impl ProductClient {
    /// Products in stored order, truncated to `limit` when given.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: Option<usize>) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list(limit).await?)
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_product(&self, attributes: Map<String, Value>) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(ProductCreate { attributes }).await?)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!(fields = patch.fields.len(), "Sending request");
        Ok(self.inner.update(id, patch).await?)
    }
}

/// Interprets a raw `limit` value.
///
/// Only a non-negative integer limits the listing; anything else means "all".
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
}
