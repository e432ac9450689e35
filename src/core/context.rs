//! Wiring of the collaborators for one CLI invocation.

use crate::config::Config;
use crate::core::record_store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::identity::IdentityProvider;
use crate::models::{Identity, ServiceRecord};
use crate::store::SqliteDocumentStore;
use std::sync::Arc;

/// Length of the id prefix shown in listings.
pub const SHORT_ID: usize = 8;

pub struct AppContext {
    pub identity: IdentityProvider,
    pub records: RecordStore,
}

impl AppContext {
    /// Open the document store and, when someone is signed in, subscribe
    /// the record store to their records.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let documents = Arc::new(SqliteDocumentStore::open(&cfg.database)?);
        let identity = IdentityProvider::from_config(cfg);

        let mut records = RecordStore::new(documents).with_week_start(cfg.week_start_day()?);
        records.set_identity(identity.current().cloned())?;

        Ok(Self { identity, records })
    }

    pub fn require_user(&self) -> AppResult<&Identity> {
        self.identity.require()
    }

    /// Find a record of the current snapshot by full id or unique id prefix.
    pub fn resolve(&self, id: &str) -> AppResult<&ServiceRecord> {
        let id = id.trim();
        let records = self.records.records();

        if let Some(exact) = records.iter().find(|r| r.id.as_str() == id) {
            return Ok(exact);
        }

        let mut matches = records.iter().filter(|r| r.id.as_str().starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(r), None) if !id.is_empty() => Ok(r),
            (Some(_), Some(_)) => Err(AppError::Validation(format!(
                "id prefix '{id}' matches more than one record"
            ))),
            _ => Err(AppError::NotFound(id.to_string())),
        }
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}
