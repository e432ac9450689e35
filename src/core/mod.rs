pub mod backup;
pub mod clock;
pub mod context;
pub mod entry;
pub mod log;
pub mod query;
pub mod record_store;
pub mod stats;
