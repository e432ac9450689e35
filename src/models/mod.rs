pub mod category;
pub mod clock_state;
pub mod identity;
pub mod service_record;
pub mod stats;

pub use category::{Category, CategoryFilter};
pub use clock_state::{ActiveSession, ClockState};
pub use identity::Identity;
pub use service_record::{NewServiceRecord, RecordId, RecordPatch, ServiceRecord};
pub use stats::ServiceStats;
