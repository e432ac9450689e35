//! SQLite-backed document store with in-process live queries.

use super::{DocumentStore, StoreEvent, Subscription, SubscriptionId};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::{DbPool, IN_MEMORY};
use crate::db::queries::{delete_record, insert_record, load_record, load_records_for_user, update_record};
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, NewServiceRecord, RecordId, RecordPatch, ServiceRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

struct Subscriber {
    id: SubscriptionId,
    identity: Identity,
    tx: Sender<StoreEvent>,
}

pub struct SqliteDocumentStore {
    pool: Mutex<DbPool>,
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl SqliteDocumentStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::open(IN_MEMORY)
    }

    /// Number of registered live queries.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn pool(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.pool
            .lock()
            .map_err(|_| AppError::Persistence("database lock poisoned".into()))
    }

    fn load(pool: &DbPool, identity: &Identity) -> AppResult<Vec<ServiceRecord>> {
        load_records_for_user(&pool.conn, identity.as_str()).map_err(to_persistence)
    }

    /// Re-deliver the full record set to every subscriber of `identity`.
    /// Called with the writer's pool guard held, so deliveries follow commit
    /// order. Lock order is pool, then subscribers.
    fn notify(&self, pool: &DbPool, identity: &Identity) {
        let event = match Self::load(pool, identity) {
            Ok(records) => StoreEvent::Records(records),
            Err(e) => StoreEvent::Failed(e.to_string()),
        };

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|s| s.identity != *identity || s.tx.send(event.clone()).is_ok());
        }
    }
}

fn to_persistence(e: AppError) -> AppError {
    match e {
        AppError::Db(err) => AppError::Persistence(err.to_string()),
        AppError::Io(err) => AppError::Persistence(err.to_string()),
        other => other,
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn subscribe(&self, identity: &Identity) -> AppResult<Subscription> {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // registered under the pool guard so no write lands between the
        // initial load and the first notification
        let pool = self.pool()?;
        let initial = Self::load(&pool, identity)?;
        // receiver is alive, cannot fail
        let _ = tx.send(StoreEvent::Records(initial));

        self.subscribers
            .lock()
            .map_err(|_| AppError::Persistence("subscriber registry poisoned".into()))?
            .push(Subscriber {
                id,
                identity: identity.clone(),
                tx,
            });

        Ok(Subscription::new(id, rx))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|s| s.id != id);
        }
    }

    fn create(&self, identity: &Identity, record: &NewServiceRecord) -> AppResult<RecordId> {
        let id = RecordId::new(Uuid::new_v4().to_string());
        let pool = self.pool()?;
        insert_record(&pool.conn, identity.as_str(), &id, record).map_err(to_persistence)?;
        ttlog(&pool.conn, "add", id.as_str(), &record.title).map_err(to_persistence)?;
        self.notify(&pool, identity);
        Ok(id)
    }

    fn update(&self, identity: &Identity, id: &RecordId, patch: &RecordPatch) -> AppResult<()> {
        let pool = self.pool()?;
        let current = load_record(&pool.conn, identity.as_str(), id)
            .map_err(to_persistence)?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let mut fields = current.fields();
        patch.apply(&mut fields);
        fields.validate()?;

        let n = update_record(&pool.conn, identity.as_str(), id, &fields)
            .map_err(to_persistence)?;
        if n == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }
        ttlog(&pool.conn, "edit", id.as_str(), &fields.title).map_err(to_persistence)?;
        self.notify(&pool, identity);
        Ok(())
    }

    fn delete(&self, identity: &Identity, id: &RecordId) -> AppResult<()> {
        let pool = self.pool()?;
        let n = delete_record(&pool.conn, identity.as_str(), id).map_err(to_persistence)?;
        if n > 0 {
            ttlog(&pool.conn, "del", id.as_str(), "Record deleted").map_err(to_persistence)?;
            self.notify(&pool, identity);
        }
        Ok(())
    }
}
