//! Request and response types exchanged with a brain.

use serde::{Deserialize, Serialize};

use crate::prompt;

/// What the caller wants back from the brain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Split a brain dump into `{"tasks": [...]}`.
    ExtractTasks,
    /// Break one task into `{"suggestions": [...]}`.
    SuggestSubtasks,
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainRequest {
    /// What kind of structured output is expected.
    pub kind: RequestKind,
    /// System instruction describing the output contract.
    pub system: String,
    /// The raw user content: a brain dump or a task title.
    pub text: String,
}

impl BrainRequest {
    /// Request task extraction for a brain dump.
    pub fn extract_tasks(system: impl Into<String>, brain_dump: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::ExtractTasks,
            system: system.into(),
            text: brain_dump.into(),
        }
    }

    /// Request sub-task suggestions for a task title.
    pub fn suggest_subtasks(task_title: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::SuggestSubtasks,
            system: prompt::GUIDE_SYSTEM_PROMPT.to_string(),
            text: task_title.into(),
        }
    }

    /// The user message sent alongside the system instruction.
    pub fn user_message(&self) -> String {
        prompt::user_message(self.kind, &self.text)
    }
}

/// The raw completion text returned by a brain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainResponse {
    /// Completion text; may wrap the JSON object in prose.
    pub text: String,
    /// Model that produced the text, when the brain reports one.
    pub model: Option<String>,
}

impl BrainResponse {
    /// A response without model information.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }
}
