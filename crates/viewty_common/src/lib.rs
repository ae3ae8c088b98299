// --- File: crates/viewty_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Shared domain models
pub mod services; // Store abstractions

// Re-export the most used items for easier access
pub use error::HttpStatusCode;
pub use models::{AvailabilityWindow, NewVisit, Visit, VisitStatus};
pub use services::{BoxFuture, StoreError, VisitStore};
