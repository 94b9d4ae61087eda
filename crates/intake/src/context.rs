//! Per-request caller identity.

use crate::error::{IntakeError, Result};

/// Who is calling. Built by the transport layer for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    user_id: Option<String>,
}

impl RequestContext {
    /// A request from a signed-in user. Blank ids count as anonymous.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user_id = user_id.trim();
        Self {
            user_id: (!user_id.is_empty()).then(|| user_id.to_string()),
        }
    }

    /// A request without a user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The caller's user id, or [`IntakeError::Unauthenticated`].
    pub fn require_user(&self) -> Result<&str> {
        self.user_id.as_deref().ok_or(IntakeError::Unauthenticated)
    }
}
