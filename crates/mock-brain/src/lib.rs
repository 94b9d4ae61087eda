//! Offline brain implementations.
//!
//! This crate provides implementations of the `Brain` trait that never touch
//! the network:
//! - `ScriptedBrain` - Replies with canned completion text
//! - `FailingBrain` - Errors on every request
//! - `DelayedBrain` - Wraps another brain with artificial delay
//! - `KeywordBrain` - Rule-based extraction, used when no API key is set
//!
//! For model-backed extraction, use the `groq-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, BrainRequest, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::new(r#"{"tasks": []}"#);
//!
//!     let request = BrainRequest::extract_tasks("system prompt", "buy eggs");
//!
//!     let response = brain.process(request).await?;
//!     println!("Response: {}", response.text);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod keyword;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse, RequestKind};

pub use delayed::DelayedBrain;
pub use failing::{FailingBrain, FailureMode};
pub use keyword::KeywordBrain;
pub use scripted::ScriptedBrain;
