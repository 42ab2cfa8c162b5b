pub mod errors;
pub mod prompts;
pub mod repositories;
pub mod responses;
pub mod suggestions;
pub mod uploads;

// Re-exports
pub use errors::{GenerationError, StorageError};
