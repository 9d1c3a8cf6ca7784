//! Survey progress persistence.
//!
//! Progress is transient, single-user state: created on the first answer,
//! rewritten on every change and removed on restart. Storage is best effort.

pub mod keeper;
pub mod store;

pub use keeper::{ProgressKeeper, SurveyProgress, DEFAULT_STORAGE_KEY};
pub use store::{FileProgressStore, MemoryProgressStore, ProgressStore};
