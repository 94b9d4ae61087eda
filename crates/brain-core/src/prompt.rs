//! Prompt builders and fingerprints.
//!
//! Only free-text work is delegated to the model: splitting, titling,
//! categorising, estimating and proposing dates. Manual overrides and routine
//! windows are applied in code afterwards and never appear here.

use sha2::{Digest, Sha256};

use crate::message::RequestKind;

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Time context shown to the model so it can turn "tomorrow" into a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionContext {
    /// The user's local time as reported by the client.
    pub local_time: String,
    /// The user's timezone label (e.g. "America/Sao_Paulo").
    pub timezone: String,
}

const EXTRACTION_RULES: &str = r#"You are a productivity assistant for people with ADHD. You receive a "brain dump" (a messy stream of thoughts) and turn it into separate, structured tasks.

RULES:
1. Multiple tasks: the user may write several things at once ("buy eggs, go to the doctor and wash the car"). Emit one task object per item. Split on line breaks, commas, connectives ("and", "also") and changes of subject.
2. Categories: judge by context, not keywords alone. Allowed values: "Home", "Work", "Study", "Personal", "Health".
   - client, meeting, supplier, service, office -> Work
   - gym, doctor, medicine, therapy -> Health
   - college, course, reading a book, learning -> Study
   - groceries, cleaning, repairs, rent -> Home
3. Dates: if the text mentions a day or time, compute it from the current context below and write it as "YYYY-MM-DDTHH:mm:ss". "tomorrow morning" means tomorrow at 09:00. Without any mention, use null.
4. Recurrence: if the text says the task repeats, set "recurrence_type" to "daily", "weekly", "monthly" or "yearly" and "recurrence_interval" to how many units apart; otherwise null.
5. Priority: urgent items, close deadlines or strong verbs ("pay", "deliver") -> "high". Routine or undated items ("check", "think about") -> "medium" or "low".
6. "estimated_time" is a positive number of minutes.

Return ONLY JSON, no text before or after:
{
  "tasks": [
    {
      "title": "Short actionable title",
      "category": "Home",
      "estimated_time": 15,
      "priority": "medium",
      "due_date": null,
      "recurrence_type": null,
      "recurrence_interval": null
    }
  ]
}"#;

/// Build the system instruction for task extraction.
pub fn extraction_prompt(context: &ExtractionContext) -> String {
    format!(
        "{}\n\nCURRENT CONTEXT: local time {} ({}).",
        EXTRACTION_RULES, context.local_time, context.timezone
    )
}

/// System instruction for breaking a task into sub-tasks.
pub const GUIDE_SYSTEM_PROMPT: &str = r#"You are an expert at breaking tasks into small chunks for people with ADHD.
Your answer must be STRICTLY valid JSON.
Return 3 to 5 practical sub-tasks needed to finish the main task.
Expected format:
{
  "suggestions": [
    {
      "title": "Short action",
      "category": "Home" | "Work" | "Study" | "Personal" | "Health",
      "estimated_time": 15,
      "priority": "high" | "medium" | "low"
    }
  ]
}"#;

/// Build the user message for a request kind.
pub fn user_message(kind: RequestKind, text: &str) -> String {
    match kind {
        RequestKind::ExtractTasks => format!("Brain dump: \"{}\"", text),
        RequestKind::SuggestSubtasks => format!("Main task: \"{}\". Generate the suggestions.", text),
    }
}
