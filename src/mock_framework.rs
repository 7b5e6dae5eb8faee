//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it reads requests off `receiver` and answers
/// through their `respond_to` channels.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(Option<usize>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { limit, respond_to }) => Some((limit, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::cart_actor::{CartAction, CartActionResult, CartError};
    use crate::clients::{CartClient, ProductClient};
    use crate::domain::{Cart, CartLine, Product, ProductPatch};
    use crate::product_actor::ProductError;
    use serde_json::{json, Map};

    #[tokio::test]
    async fn test_product_client_maps_not_found() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_product(9).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 9);
        responder.send(Err(FrameworkError::NotFound("9".to_string()))).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result, Err(ProductError::NotFound("9".to_string())));
        assert_eq!(result.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_product_client_forwards_limit_and_patch() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let list_client = client.clone();
        let list_task = tokio::spawn(async move { list_client.list_products(Some(1)).await });
        let (limit, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        assert_eq!(limit, Some(1));
        responder.send(Ok(vec![])).unwrap();
        assert_eq!(list_task.await.unwrap(), Ok(vec![]));

        let mut fields = Map::new();
        fields.insert("price".to_string(), json!(12));
        let update_task = tokio::spawn(async move { client.update_product(4, ProductPatch::from(fields)).await });
        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, 4);
        assert_eq!(patch.fields["price"], json!(12));
        responder.send(Err(FrameworkError::Validation("product id is immutable".to_string()))).unwrap();

        let err = update_task.await.unwrap().unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_cart_client_defaults_quantity_to_one() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let add_task = tokio::spawn(async move { client.add_product(1, 20, None).await });

        let (cart_id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(cart_id, 1);
        match action {
            CartAction::AddProduct { product_id, quantity } => {
                assert_eq!(product_id, 20);
                assert_eq!(quantity, 1);
            }
        }
        responder
            .send(Ok(CartActionResult::AddProduct(vec![CartLine::new(20, 1)])))
            .unwrap();

        assert_eq!(add_task.await.unwrap(), Ok(vec![CartLine::new(20, 1)]));
    }

    #[tokio::test]
    async fn test_cart_client_rejects_negative_quantity_without_sending() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let err = client.add_product(1, 20, Some(-1)).await.unwrap_err();

        assert!(matches!(err, CartError::ValidationError(_)));
        assert_eq!(err.status_code(), 400);
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cart_client_create_returns_new_cart() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let create_task = tokio::spawn(async move { client.create_cart().await });

        let (_params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        responder.send(Ok(Cart { id: 77, lines: vec![] })).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(Cart { id: 77, lines: vec![] }));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let lines_task = tokio::spawn(async move { client.get_lines(3).await });

        let (_id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        drop(responder);

        let err = lines_task.await.unwrap().unwrap_err();
        assert!(matches!(err, CartError::ActorCommunicationError(_)));
        assert_eq!(err.status_code(), 500);
    }
}
