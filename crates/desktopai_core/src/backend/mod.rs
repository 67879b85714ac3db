//! Backend service contract consumed by the view controller.
//!
//! # Responsibility
//! - Declare the async operations the shell may call on its backend.
//! - Define one error type for every backend failure the shell surfaces.
//!
//! # Invariants
//! - Dates cross this boundary as calendar dates, never timestamps.
//! - Mutation side effects are observed only through a later snapshot.

use crate::dashboard::DashboardSnapshot;
use crate::model::task::TaskId;
use crate::repo::task_repo::RepoError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure of one backend call.
#[derive(Debug)]
pub enum BackendError {
    /// Task store failure.
    Repo(RepoError),
    /// Referenced task does not exist.
    NotFound(TaskId),
    /// Caller input rejected before reaching storage.
    InvalidInput(String),
    /// Operation not offered by this backend.
    Unsupported(&'static str),
    /// Bridge or transport failure reported by a remote backend.
    Transport(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Unsupported(operation) => {
                write!(f, "operation `{operation}` is not supported by this backend")
            }
            Self::Transport(message) => write!(f, "backend unavailable: {message}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BackendError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Operations the shell calls on its assistant backend.
///
/// Implementations own persistent task data and command processing.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Runs one free-form command and returns the reply text.
    async fn process_command(&self, text: &str) -> BackendResult<String>;

    /// Returns day tasks and the upcoming horizon for `date`.
    async fn get_dashboard_data(&self, date: NaiveDate) -> BackendResult<DashboardSnapshot>;

    /// Flips completion of one task.
    async fn toggle_task(&self, id: TaskId) -> BackendResult<()>;

    async fn delete_task(&self, id: TaskId) -> BackendResult<()>;

    /// Creates a task from free text.
    async fn quick_add_task(&self, text: &str) -> BackendResult<()>;

    /// Persists one UI/behavior setting.
    async fn update_setting(&self, key: &str, value: serde_json::Value) -> BackendResult<()>;
}
