//! Document store seam.
//!
//! The record store never talks to a database directly: it goes through a
//! [`DocumentStore`], which offers an identity-scoped live query plus
//! create/update/delete keyed by record id. Every change re-delivers the
//! full record set of the affected identity to its subscribers.

pub mod sqlite;

use crate::errors::AppResult;
use crate::models::{Identity, NewServiceRecord, RecordId, RecordPatch, ServiceRecord};
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

pub use sqlite::SqliteDocumentStore;

pub type SubscriptionId = u64;

/// One notification of a live query.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Full, unordered record set of the subscribed identity.
    Records(Vec<ServiceRecord>),
    /// The live query failed (e.g. permission revoked). Later events may follow.
    Failed(String),
}

/// Outcome of polling a subscription.
#[derive(Debug)]
pub enum Delivery {
    Event(StoreEvent),
    Empty,
    Closed,
}

/// Receiving end of a live query. Once dropped, the store prunes the
/// subscriber on its next delivery attempt.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    events: Receiver<StoreEvent>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, events: Receiver<StoreEvent>) -> Self {
        Self { id, events }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn try_next(&self) -> Delivery {
        match self.events.try_recv() {
            Ok(ev) => Delivery::Event(ev),
            Err(TryRecvError::Empty) => Delivery::Empty,
            Err(TryRecvError::Disconnected) => Delivery::Closed,
        }
    }

    pub fn next_timeout(&self, timeout: Duration) -> Delivery {
        match self.events.recv_timeout(timeout) {
            Ok(ev) => Delivery::Event(ev),
            Err(RecvTimeoutError::Timeout) => Delivery::Empty,
            Err(RecvTimeoutError::Disconnected) => Delivery::Closed,
        }
    }
}

/// Hosted-persistence contract. Implementations report transport failures
/// as `AppError::Persistence` and unknown ids on update as `AppError::NotFound`.
pub trait DocumentStore: Send + Sync {
    /// Start a live query for `identity`. The current record set is delivered
    /// right away, then again after every change.
    fn subscribe(&self, identity: &Identity) -> AppResult<Subscription>;

    /// Stop a live query. Unknown or already removed ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    fn create(&self, identity: &Identity, record: &NewServiceRecord) -> AppResult<RecordId>;

    fn update(&self, identity: &Identity, id: &RecordId, patch: &RecordPatch) -> AppResult<()>;

    /// Deleting an id that does not exist succeeds.
    fn delete(&self, identity: &Identity, id: &RecordId) -> AppResult<()>;
}
