// tasktrack - personal task tracker: JSON-backed store with CSV interchange

pub mod error;
pub mod models;
pub mod store;

// Re-export main types for convenience
pub use error::StoreError;
pub use models::{DUE_DATE_FORMAT, Priority, Status, Task};
pub use store::{CSV_HEADER, TaskStore};
