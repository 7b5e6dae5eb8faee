use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::actor_framework::{IdGenerator, ResourceActor};
use crate::clients::{CartClient, ProductClient};
use crate::domain::{Cart, Product};
use crate::store::CollectionStore;

use super::config::ShopConfig;

/// Owns one actor per collection and hands out their clients.
///
/// Each actor is the only writer of its file, so operations on the same
/// collection run one after another while products and carts proceed
/// independently.
pub struct ShopSystem {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts the product and cart actors. Must be called inside a Tokio runtime.
    #[instrument(name = "shop_system", skip(config))]
    pub fn start(config: &ShopConfig) -> Self {
        info!(data_dir = %config.data_dir.display(), "Starting shop system");
        let ids = Arc::new(IdGenerator::new());

        let next_product_id = {
            let ids = Arc::clone(&ids);
            move || ids.next_id()
        };
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(
            config.buffer_size,
            CollectionStore::new(config.products_path()),
            next_product_id,
        );
        let product_handle = tokio::spawn(product_actor.run());

        let next_cart_id = move || ids.next_id();
        let (cart_actor, cart_resource_client) = ResourceActor::<Cart>::new(
            config.buffer_size,
            CollectionStore::new(config.carts_path()),
            next_cart_id,
        );
        let cart_handle = tokio::spawn(cart_actor.run());

        Self {
            product_client: ProductClient::new(product_resource_client),
            cart_client: CartClient::new(cart_resource_client),
            handles: vec![product_handle, cart_handle],
        }
    }

    /// Stops both actors after their queued requests and waits for them.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down shop system");

        let _ = self.product_client.shutdown().await;
        let _ = self.cart_client.shutdown().await;

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("Shop system shutdown complete");
                Ok(())
            }
        }
    }
}
