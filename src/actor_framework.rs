use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any document kept by a [`ResourceActor`] must implement.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Collection name, used in logs.
    const NAME: &'static str;

    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Listing and snapshot order. Smaller keys come first.
    type SortKey: Ord;

    fn id(&self) -> &Self::Id;

    fn sort_key(&self) -> Self::SortKey;

    /// Construct the full document from the store-assigned id, the payload
    /// and the store clock.
    fn from_create(
        id: Self::Id,
        payload: Self::CreatePayload,
        now: DateTime<Utc>,
    ) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after every successful update or action.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    // --- Action Handler ---

    /// Handle a custom domain-specific action. The document is only replaced
    /// in the store when this returns `Ok`.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Transport and lookup failures, plus the entity's own rejection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Entity(E),
}

// =============================================================================
// 2. SNAPSHOT SUBSCRIPTIONS
// =============================================================================

/// Failure reported by a snapshot source instead of a collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    #[error("Feed disconnected: {0}")]
    Disconnected(String),
    #[error("Feed permission denied: {0}")]
    PermissionDenied(String),
}

/// One emission: the entire current collection, already sorted.
pub type Snapshot<T> = Result<Vec<T>, FeedError>;

pub type SnapshotSender<T> = mpsc::UnboundedSender<Snapshot<T>>;

/// Receiving end of a live collection feed.
///
/// Any source can produce one through [`Subscription::channel`]; the store
/// actor is just one of them. Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<Snapshot<T>>,
}

impl<T> Subscription<T> {
    pub fn new(receiver: mpsc::UnboundedReceiver<Snapshot<T>>) -> Self {
        Self { receiver }
    }

    pub fn channel() -> (SnapshotSender<T>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self::new(receiver))
    }

    /// Next emission, or `None` once the source is gone.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        self.receiver.recv().await
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Subscribe {
        respond_to: oneshot::Sender<Subscription<T>>,
    },
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    subscribers: Vec<SnapshotSender<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    clock: Clock,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            subscribers: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            clock: Box::new(Utc::now),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Replace the wall clock used for creation and update timestamps.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[instrument(name = "resource_actor", fields(entity = T::NAME), skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let result = self.handle_create(payload);
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.sorted()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = self.handle_update(id, patch);
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.handle_delete(id);
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = self.handle_action(id, action);
                    if result.is_ok() {
                        self.publish();
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let (sender, subscription) = Subscription::channel();
                    // Sources emit the current collection right away.
                    if sender.send(Ok(self.sorted())).is_ok() {
                        self.subscribers.push(sender);
                    }
                    let _ = respond_to.send(subscription);
                    debug!(subscribers = self.subscribers.len(), "Subscriber added");
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        if self.store.contains_key(&id) {
            warn!(id = %id, "Create refused, id already taken");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        let mut item = T::from_create(id.clone(), payload, (self.clock)()).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        debug!(id = %item.id(), "Item created");
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let now = (self.clock)();
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        // Work on a copy so a rejected patch leaves the stored document intact.
        let mut updated = item.clone();
        updated.on_update(patch).map_err(FrameworkError::Entity)?;
        updated.touch(now);
        *item = updated.clone();
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let now = (self.clock)();
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut updated = item.clone();
        let result = updated.handle_action(action).map_err(FrameworkError::Entity)?;
        updated.touch(now);
        *item = updated;
        Ok(result)
    }

    fn sorted(&self) -> Vec<T> {
        let mut items: Vec<T> = self.store.values().cloned().collect();
        items.sort_by_key(|item| item.sort_key());
        items
    }

    /// Push the full collection to every live subscriber, pruning closed ones.
    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.sorted();
        let before = self.subscribers.len();
        self.subscribers.retain(|sender| sender.send(Ok(snapshot.clone())).is_ok());
        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            warn!(pruned, "Dropped closed subscribers");
        }
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
        msg: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, FrameworkError<T::Error>>>,
    ) -> Result<R, FrameworkError<T::Error>> {
        self.sender.send(msg).await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Create { payload, respond_to }, response).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Get { id, respond_to }, response).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::List { respond_to }, response).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Update { id, patch, respond_to }, response).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Delete { id, respond_to }, response).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Action { id, action, respond_to }, response).await
    }

    /// Live snapshots of the whole collection.
    ///
    /// The queue behind a subscription is unbounded and holds one full copy
    /// of the collection per write, so a subscriber must keep calling
    /// [`Subscription::next`] or drop the subscription.
    pub async fn subscribe(&self) -> Result<Subscription<T>, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Subscribe { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================
