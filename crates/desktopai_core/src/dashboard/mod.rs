//! Dashboard snapshot input and reconciled output.
//!
//! # Responsibility
//! - Define the per-date snapshot the backend supplies.
//! - Define the schedule/todo lists handed to rendering.
//! - Derive per-row display flags for renderers.
//!
//! # Invariants
//! - Outputs are recomputed from a snapshot on every reconciliation.
//! - No identifier appears twice in `Dashboard::schedule`.
//! - `Dashboard::todos` never contains a completed or timed task.

pub mod aggregator;

pub use aggregator::reconcile;

use crate::model::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Backend bundle for one requested date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Date the snapshot was built for.
    pub view_date: NaiveDate,
    /// Every task dated `view_date`, in any completion state.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Tasks dated on or after `view_date`, in backend order.
    #[serde(default)]
    pub upcoming: Vec<Task>,
}

impl DashboardSnapshot {
    pub fn empty(view_date: NaiveDate) -> Self {
        Self {
            view_date,
            tasks: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// Reconciled lists for the agenda and todo panels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub view_date: Option<NaiveDate>,
    /// Timed tasks of the day, then non-duplicate upcoming tasks.
    pub schedule: Vec<Task>,
    /// Untimed pending tasks of the day.
    pub todos: Vec<Task>,
}

/// Display projection of one task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    /// Schedule rows show the date since upcoming items span many days.
    pub show_date: bool,
    pub is_deadline: bool,
    pub completed: bool,
}

impl<'a> TaskRow<'a> {
    fn project(task: &'a Task, show_date: bool) -> Self {
        Self {
            task,
            show_date,
            is_deadline: task.is_deadline(),
            completed: task.completed,
        }
    }
}

impl Dashboard {
    pub fn schedule_rows(&self) -> Vec<TaskRow<'_>> {
        self.schedule
            .iter()
            .map(|task| TaskRow::project(task, true))
            .collect()
    }

    pub fn todo_rows(&self) -> Vec<TaskRow<'_>> {
        self.todos
            .iter()
            .map(|task| TaskRow::project(task, false))
            .collect()
    }

    /// Whether the agenda panel should render its empty state.
    pub fn is_empty_schedule(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Whether the todo panel should render its empty state.
    pub fn is_empty_todos(&self) -> bool {
        self.todos.is_empty()
    }
}

/// Agenda panel header, e.g. `Schedule for Mon Oct 19 2026`.
pub fn schedule_header(date: NaiveDate) -> String {
    format!("Schedule for {}", date.format("%a %b %d %Y"))
}
