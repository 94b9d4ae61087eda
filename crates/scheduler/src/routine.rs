//! The routine model: per-category availability windows.

use std::collections::HashSet;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SchedulerError};
use crate::time::{format_time_of_day, parse_time_of_day};
use crate::types::Category;

/// A daily time-of-day interval `[start_time, end_time)` in which a
/// category's tasks should be scheduled.
///
/// Windows never span midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct RoutineWindow {
    pub category: Category,
    #[serde(serialize_with = "serialize_time")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_time")]
    pub end_time: NaiveTime,
}

fn serialize_time<S: Serializer>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time_of_day(*time))
}

/// Accepts both `start_time`/`end_time` and the short `start`/`end` keys.
#[derive(Deserialize)]
struct RawWindow {
    category: Category,
    #[serde(alias = "start")]
    start_time: String,
    #[serde(alias = "end")]
    end_time: String,
}

impl TryFrom<RawWindow> for RoutineWindow {
    type Error = SchedulerError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        RoutineWindow::parse(raw.category, &raw.start_time, &raw.end_time)
    }
}

impl RoutineWindow {
    /// Create a window, rejecting empty or inverted intervals.
    pub fn new(category: Category, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self> {
        if start_time >= end_time {
            return Err(SchedulerError::EmptyWindow {
                category,
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            category,
            start_time,
            end_time,
        })
    }

    /// Create a window from `HH:MM` strings.
    pub fn parse(category: Category, start: &str, end: &str) -> Result<Self> {
        Self::new(category, parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    /// Whether `time` lies inside the window (end exclusive).
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time < self.end_time
    }

    /// The first window opening at or after `after`: today's if it has not
    /// passed yet, otherwise tomorrow's.
    pub fn next_start(&self, after: NaiveDateTime) -> NaiveDateTime {
        let today = after.date().and_time(self.start_time);
        if today >= after {
            return today;
        }
        after
            .date()
            .succ_opt()
            .map(|tomorrow| tomorrow.and_time(self.start_time))
            .unwrap_or(today)
    }
}

/// A user's full set of routine windows, at most one per category.
///
/// An empty routine is valid and means "free schedule": nothing is clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Routine {
    windows: Vec<RoutineWindow>,
}

impl Routine {
    /// Build a routine, rejecting two windows for one category.
    pub fn new(windows: Vec<RoutineWindow>) -> Result<Self> {
        let mut seen = HashSet::new();
        for window in &windows {
            if !seen.insert(window.category) {
                return Err(SchedulerError::DuplicateCategory(window.category));
            }
        }
        Ok(Self { windows })
    }

    /// A routine with no windows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The routine offered to new users before they save their own.
    pub fn onboarding_default() -> Self {
        let window = |category, start: (u32, u32), end: (u32, u32)| RoutineWindow {
            category,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or(NaiveTime::MIN),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or(NaiveTime::MIN),
        };
        Self {
            windows: vec![
                window(Category::Work, (9, 0), (18, 0)),
                window(Category::Home, (18, 0), (22, 0)),
                window(Category::Study, (20, 0), (21, 0)),
            ],
        }
    }

    /// All windows, in the order they were given.
    pub fn windows(&self) -> &[RoutineWindow] {
        &self.windows
    }

    /// Consume the routine and return its windows.
    pub fn into_windows(self) -> Vec<RoutineWindow> {
        self.windows
    }

    /// Whether the routine declares no windows at all.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window declared for `category`, if any.
    pub fn window_for(&self, category: Category) -> Option<&RoutineWindow> {
        self.windows.iter().find(|w| w.category == category)
    }

    /// Whether `category` is available at `at`. Categories without a window
    /// are always available.
    pub fn is_active(&self, category: Category, at: NaiveDateTime) -> bool {
        self.window_for(category)
            .map_or(true, |window| window.contains(at.time()))
    }

    /// When the category's next window opens, at or after `after`.
    pub fn next_window_start(&self, category: Category, after: NaiveDateTime) -> Option<NaiveDateTime> {
        self.window_for(category).map(|window| window.next_start(after))
    }
}

impl<'de> Deserialize<'de> for Routine {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let windows = Vec::<RoutineWindow>::deserialize(deserializer)?;
        Routine::new(windows).map_err(serde::de::Error::custom)
    }
}
