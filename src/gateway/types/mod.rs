//! Gateway types module
//!
//! ## Input Types
//! - [`EnvelopeBody`]: Axum extractor unwrapping `{ data }` into a `Payload`
//!
//! ## Output Types
//! - [`Envelope<T>`]: `{ data }` success wrapper
//! - [`ErrorBody`]: `{ message }` error wrapper
//!
//! ## Submodules
//! - [`body`]: Request envelope extraction
//! - [`response`]: Response types and helpers

pub mod body;
pub mod response;

// Re-export commonly used types at module root
pub use body::EnvelopeBody;
pub use response::{ApiResult, Envelope, ErrorBody, created, no_content, ok};
