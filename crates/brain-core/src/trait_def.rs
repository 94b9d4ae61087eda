//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{BrainRequest, BrainResponse};

/// Turns a brain dump or task title into a JSON-bearing completion.
///
/// Brains never see routines or manual overrides; scheduling happens after
/// the completion is parsed. Object-safe, so services hold an
/// `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Complete one request. The text may wrap its JSON object in prose.
    async fn process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError>;

    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Whether requests are currently expected to succeed.
    async fn is_ready(&self) -> bool {
        true
    }
}
