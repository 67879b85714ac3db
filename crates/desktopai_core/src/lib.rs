//! Core view-model logic for the DesktopAI shell.
//! This crate owns calendar state, schedule reconciliation and the local
//! task-store backend; UI hosts only render what it computes.

pub mod backend;
pub mod calendar;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use backend::{AssistantBackend, BackendError, BackendResult};
pub use calendar::{local_today, CalendarModel, DayCell, GridCell};
pub use config::{ConfigError, ShellConfig};
pub use controller::{
    response_reports_task_change, CommandReply, RefreshOutcome, RefreshTicket, ViewController,
};
pub use dashboard::{reconcile, schedule_header, Dashboard, DashboardSnapshot, TaskRow};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{DateKey, DateKeyError, WeekStart, YearMonth};
pub use model::task::{normalize_clock, NewTask, Task, TaskCategory, TaskId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::LocalBackend;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
