use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::store::{CollectionStore, StoreError};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any persisted record must implement to be managed by [`ResourceActor`].
///
/// The actor owns the whole collection of `Self`; hooks run against one record
/// loaded from that collection, and the collection is saved only when the hook
/// succeeds.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: PartialEq + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Debug;
    type Patch: Send + Debug;
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from a freshly assigned id and the params.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), FrameworkError> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;
    fn on_delete(&self) -> Result<(), FrameworkError> { Ok(()) }

    /// Handle a domain-specific mutation of one record.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Stored collection is unreadable: {0}")]
    Decode(String),
    #[error("Storage failure: {0}")]
    Io(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the request")]
    ActorDropped,
}

impl From<StoreError> for FrameworkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { .. } => FrameworkError::Io(err.to_string()),
            StoreError::Decode { .. } | StoreError::Encode { .. } => {
                FrameworkError::Decode(err.to_string())
            }
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        limit: Option<usize>,
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Shutdown,
}

// =============================================================================
// 3. IDENTIFIER GENERATION
// =============================================================================

/// Strictly increasing identifiers seeded from wall-clock milliseconds.
///
/// Two calls never return the same value, even within one millisecond or
/// when the clock steps backwards.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single writer for one persisted collection.
///
/// Every request is a full load-mutate-save cycle and requests are served one
/// at a time, so cycles on the same collection never interleave.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: CollectionStore<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        store: CollectionStore<T>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!(path = %self.store.path().display(), "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { limit, respond_to } => {
                    let _ = respond_to.send(self.handle_list(limit).await);
                }
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id).await);
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id).await);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action).await);
                }
                ResourceRequest::Shutdown => {
                    info!("Actor shutting down");
                    break;
                }
            }
        }
        info!("Actor stopped");
    }

    async fn handle_list(&self, limit: Option<usize>) -> Result<Vec<T>, FrameworkError> {
        let mut items = self.store.load_all().await?;
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    #[instrument(skip(self, params))]
    async fn handle_create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let mut items = self.store.load_all().await?;

        let mut id = (self.next_id_fn)();
        while items.iter().any(|item| item.id() == &id) {
            warn!(id = %id, "Generated id already in use, drawing another");
            id = (self.next_id_fn)();
        }

        let mut item = T::from_create_params(id, params)?;
        item.on_create()?;
        items.push(item.clone());
        self.store.save_all(&items).await?;

        info!(id = %item.id(), "Item created");
        Ok(item)
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn handle_get(&self, id: T::Id) -> Result<T, FrameworkError> {
        let items = self.store.load_all().await?;
        items
            .into_iter()
            .find(|item| item.id() == &id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, id, patch), fields(id = %id))]
    async fn handle_update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let mut items = self.store.load_all().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id() == &id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        item.on_update(patch)?;
        let updated = item.clone();
        self.store.save_all(&items).await?;

        info!("Item updated");
        Ok(updated)
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn handle_delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let mut items = self.store.load_all().await?;
        let position = items
            .iter()
            .position(|item| item.id() == &id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        items[position].on_delete()?;
        items.retain(|item| item.id() != &id);
        self.store.save_all(&items).await?;

        info!("Item deleted");
        Ok(())
    }

    #[instrument(skip(self, id, action), fields(id = %id))]
    async fn handle_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let mut items = self.store.load_all().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id() == &id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        debug!(action = ?action, "Applying action");
        let result = item.handle_action(action)?;
        self.store.save_all(&items).await?;
        Ok(result)
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { limit, respond_to }).await
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// Asks the actor to stop after the requests already queued ahead of this one.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================
