//! Closed enumerations shared by every layer.
//!
//! Parsing is lenient about case and accents and accepts the Portuguese
//! labels used by the first version of the app, so rows and model output
//! written in either language map onto the same variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Lowercase and strip the accents that appear in the accepted labels.
fn fold(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Task category. Each category may own one routine window.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Home,
    Work,
    Study,
    #[default]
    Personal,
    Health,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Home,
        Category::Study,
        Category::Personal,
        Category::Health,
    ];

    /// Storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::Work => "work",
            Category::Study => "study",
            Category::Personal => "personal",
            Category::Health => "health",
        }
    }

    /// Human-readable label, used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Personal => "Personal",
            Category::Health => "Health",
        }
    }
}

impl FromStr for Category {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "home" | "house" | "casa" => Ok(Category::Home),
            "work" | "job" | "trabalho" => Ok(Category::Work),
            "study" | "studies" | "estudo" | "estudos" => Ok(Category::Study),
            "personal" | "pessoal" => Ok(Category::Personal),
            "health" | "saude" => Ok(Category::Health),
            _ => Err(SchedulerError::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "high" | "alta" | "alto" | "urgent" => Ok(Priority::High),
            "medium" | "media" | "medio" | "normal" => Ok(Priority::Medium),
            "low" | "baixa" | "baixo" => Ok(Priority::Low),
            _ => Err(SchedulerError::UnknownVariant {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceType {
    /// Storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Yearly => "yearly",
        }
    }
}

impl FromStr for RecurrenceType {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "daily" | "diario" | "diaria" => Ok(RecurrenceType::Daily),
            "weekly" | "semanal" => Ok(RecurrenceType::Weekly),
            "monthly" | "mensal" => Ok(RecurrenceType::Monthly),
            "yearly" | "annual" | "anual" => Ok(RecurrenceType::Yearly),
            _ => Err(SchedulerError::UnknownVariant {
                kind: "recurrence type",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RecurrenceType {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurrence rule: repeat every `interval` units of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurrence")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    pub interval: u32,
}

impl Recurrence {
    /// Create a recurrence, rejecting an interval of zero.
    pub fn new(kind: RecurrenceType, interval: u32) -> Result<Self, SchedulerError> {
        if interval == 0 {
            return Err(SchedulerError::InvalidInterval);
        }
        Ok(Self { kind, interval })
    }

    /// Repeat every single unit of `kind`.
    pub fn every(kind: RecurrenceType) -> Self {
        Self { kind, interval: 1 }
    }
}

#[derive(Deserialize)]
struct RawRecurrence {
    #[serde(rename = "type")]
    kind: RecurrenceType,
    interval: u32,
}

impl TryFrom<RawRecurrence> for Recurrence {
    type Error = SchedulerError;

    fn try_from(raw: RawRecurrence) -> Result<Self, Self::Error> {
        Recurrence::new(raw.kind, raw.interval)
    }
}

/// Completion state of a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TaskStatus {
    Pending,
    Done,
}

impl TaskStatus {
    /// Storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }

    /// Status for a completion checkbox.
    pub fn from_done(done: bool) -> Self {
        if done {
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        }
    }
}

impl FromStr for TaskStatus {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "pending" | "pendente" => Ok(TaskStatus::Pending),
            "done" | "concluido" => Ok(TaskStatus::Done),
            _ => Err(SchedulerError::UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = SchedulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
