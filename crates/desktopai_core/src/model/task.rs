//! Task record delivered by the backend.
//!
//! # Responsibility
//! - Define the transient task copy the view-model works with.
//! - Classify tasks as timed or untimed-pending.
//!
//! # Invariants
//! - `id` is stable across fetches and never reused for another task.
//! - `time` presence alone decides whether a task is timed.
//! - `category` drives display emphasis only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable task identifier assigned by the backend.
pub type TaskId = i64;

/// Display category tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    /// Due date to highlight in the schedule.
    Deadline,
    /// Plain actionable item.
    Todo,
    /// Calendar event.
    Event,
    /// Anything created without an explicit category.
    #[default]
    Other,
}

impl TaskCategory {
    /// Stable string id used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deadline => "Deadline",
            Self::Todo => "Todo",
            Self::Event => "Event",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Deadline" => Some(Self::Deadline),
            "Todo" => Some(Self::Todo),
            "Event" => Some(Self::Event),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// One task as returned by `get_dashboard_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// `HH:MM` start time; `None` for untimed tasks.
    #[serde(default)]
    pub time: Option<String>,
    /// `HH:MM` end time, meaningful only with `time`.
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a pending, untimed task with default category.
    pub fn new(id: TaskId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            time: None,
            end_time: None,
            reminder: false,
            category: TaskCategory::Other,
            completed: false,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns whether the task carries a clock time.
    ///
    /// A blank time string counts as no time.
    pub fn is_timed(&self) -> bool {
        self.time
            .as_deref()
            .is_some_and(|time| !time.trim().is_empty())
    }

    /// Returns whether the task belongs in the todo panel.
    pub fn is_untimed_pending(&self) -> bool {
        !self.is_timed() && !self.completed
    }

    pub fn is_deadline(&self) -> bool {
        self.category == TaskCategory::Deadline
    }
}

/// Trims a clock value and maps blank input to `None`.
pub fn normalize_clock(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|time| !time.is_empty())
        .map(str::to_string)
}

/// Creation request for the local task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub end_time: Option<String>,
    pub reminder: bool,
    pub category: TaskCategory,
}

impl NewTask {
    /// Untimed request with default category and no reminder.
    pub fn untimed(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            time: None,
            end_time: None,
            reminder: false,
            category: TaskCategory::Other,
        }
    }
}
