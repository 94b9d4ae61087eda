//! Core trait and types for task-extraction brains.
//!
//! This crate provides the shared interface for every brain that can turn a
//! brain dump into structured tasks. It defines:
//!
//! - [`Brain`] - The trait that all brain implementations must implement
//! - [`BrainRequest`] / [`BrainResponse`] - Request and completion types
//! - [`BrainError`] - Error types for brain operations
//! - [`prompt`] - System instructions and prompt fingerprints
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, BrainRequest, BrainResponse};
//! use async_trait::async_trait;
//!
//! struct EmptyBrain;
//!
//! #[async_trait]
//! impl Brain for EmptyBrain {
//!     async fn process(&self, _request: BrainRequest) -> Result<BrainResponse, BrainError> {
//!         Ok(BrainResponse::text(r#"{"tasks": []}"#))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "EmptyBrain"
//!     }
//! }
//! ```

mod error;
mod message;
pub mod prompt;
mod trait_def;

pub use error::BrainError;
pub use message::{BrainRequest, BrainResponse, RequestKind};
pub use prompt::{hash_prompt, ExtractionContext};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
