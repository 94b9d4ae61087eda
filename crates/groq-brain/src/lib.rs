//! Groq-based brain implementation.
//!
//! This crate provides a [`Brain`] that sends extraction and suggestion
//! requests to the Groq chat-completions API (OpenAI-compatible).
//!
//! # Features
//!
//! - Stateless single-shot completions
//! - JSON-object output mode
//! - Bounded retry with exponential backoff on transient failures
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use groq_brain::{Brain, BrainRequest, GroqBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GroqBrain::from_env()?;
//!     let response = brain
//!         .process(BrainRequest::suggest_subtasks("Prepare tax return"))
//!         .await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GroqBrain;
pub use config::{GroqBrainConfig, GroqBrainConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse};
