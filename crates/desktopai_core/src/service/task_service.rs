//! Local task-store backend.
//!
//! # Responsibility
//! - Serve dashboard snapshots from the SQLite task store.
//! - Apply toggle/delete/quick-add/setting mutations.
//! - Implement `AssistantBackend` so the view controller can drive it.
//!
//! # Invariants
//! - Quick-add creates untimed `Other` tasks dated on the backend's today.
//! - Free-form commands are not interpreted here.
//! - Logs carry ids, dates and counts only, never task titles.

use crate::backend::{AssistantBackend, BackendError, BackendResult};
use crate::calendar::local_today;
use crate::config::ShellConfig;
use crate::dashboard::DashboardSnapshot;
use crate::db::{open_db, open_db_in_memory};
use crate::model::task::{normalize_clock, NewTask, TaskId};
use crate::repo::task_repo::{RepoResult, SqliteTaskRepository, TaskRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Backend over one SQLite task-store connection.
pub struct LocalBackend {
    conn: Mutex<Connection>,
    upcoming_limit: u32,
    fixed_today: Option<NaiveDate>,
}

impl LocalBackend {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection, upcoming_limit: u32) -> Self {
        Self {
            conn: Mutex::new(conn),
            upcoming_limit,
            fixed_today: None,
        }
    }

    /// Opens the store file at `path`.
    pub fn open(path: impl AsRef<Path>, upcoming_limit: u32) -> BackendResult<Self> {
        let conn = open_db(path).map_err(|err| BackendError::Repo(err.into()))?;
        Ok(Self::new(conn, upcoming_limit))
    }

    /// Opens the store configured in `config`.
    pub fn from_config(config: &ShellConfig) -> BackendResult<Self> {
        Self::open(&config.db_path, config.upcoming_limit)
    }

    /// Opens a throwaway in-memory store.
    pub fn in_memory(upcoming_limit: u32) -> BackendResult<Self> {
        let conn = open_db_in_memory().map_err(|err| BackendError::Repo(err.into()))?;
        Ok(Self::new(conn, upcoming_limit))
    }

    /// Pins "today" instead of reading the host clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(local_today)
    }

    /// Builds the dashboard snapshot for `date`.
    pub fn snapshot(&self, date: NaiveDate) -> BackendResult<DashboardSnapshot> {
        let limit = self.upcoming_limit;
        let (tasks, upcoming) = self.with_repo(|repo| {
            Ok((repo.tasks_for_date(date)?, repo.upcoming_tasks(date, limit)?))
        })?;
        info!(
            "event=dashboard_snapshot module=service status=ok date={date} tasks={} upcoming={}",
            tasks.len(),
            upcoming.len()
        );
        Ok(DashboardSnapshot {
            view_date: date,
            tasks,
            upcoming,
        })
    }

    /// Creates one task from a full request.
    pub fn add_task(&self, task: &NewTask) -> BackendResult<TaskId> {
        let title = task.title.trim();
        if title.is_empty() {
            return Err(BackendError::InvalidInput(
                "task title must not be empty".to_string(),
            ));
        }
        let normalized = NewTask {
            title: title.to_string(),
            time: normalize_clock(task.time.as_deref()),
            end_time: normalize_clock(task.end_time.as_deref()),
            ..task.clone()
        };
        let id = self.with_repo(|repo| repo.create_task(&normalized))?;
        info!(
            "event=task_create module=service status=ok task_id={id} date={} category={}",
            normalized.date,
            normalized.category.as_str()
        );
        Ok(id)
    }

    /// Creates an untimed task for today from free text.
    pub fn quick_add(&self, text: &str) -> BackendResult<TaskId> {
        self.add_task(&NewTask::untimed(text, self.today()))
    }

    /// Flips completion and returns the new state.
    pub fn toggle(&self, id: TaskId) -> BackendResult<bool> {
        let completed = self.with_repo(|repo| repo.toggle_task(id))?;
        info!("event=task_toggle module=service status=ok task_id={id} completed={completed}");
        Ok(completed)
    }

    pub fn delete(&self, id: TaskId) -> BackendResult<()> {
        self.with_repo(|repo| repo.delete_task(id))?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    /// Stores one setting as JSON text.
    pub fn set_setting(&self, key: &str, value: &serde_json::Value) -> BackendResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(BackendError::InvalidInput(
                "setting key must not be empty".to_string(),
            ));
        }
        let encoded = value.to_string();
        self.with_repo(|repo| repo.put_setting(key, &encoded))?;
        info!("event=setting_update module=service status=ok key={key}");
        Ok(())
    }

    /// Reads one setting back; `None` when never written.
    pub fn setting(&self, key: &str) -> BackendResult<Option<serde_json::Value>> {
        let raw = self.with_repo(|repo| repo.get_setting(key.trim()))?;
        raw.map(|text| {
            serde_json::from_str(&text).map_err(|err| {
                BackendError::InvalidInput(format!("stored setting `{key}` is not JSON: {err}"))
            })
        })
        .transpose()
    }

    fn with_repo<T>(
        &self,
        f: impl FnOnce(&SqliteTaskRepository<'_>) -> RepoResult<T>,
    ) -> BackendResult<T> {
        let conn = self.conn.lock().map_err(|_| {
            warn!("event=store_lock module=service status=error error_code=lock_poisoned");
            BackendError::Transport("task store lock poisoned".to_string())
        })?;
        let repo = SqliteTaskRepository::new(&conn);
        f(&repo).map_err(BackendError::from)
    }
}

#[async_trait]
impl AssistantBackend for LocalBackend {
    async fn process_command(&self, _text: &str) -> BackendResult<String> {
        Err(BackendError::Unsupported("process_command"))
    }

    async fn get_dashboard_data(&self, date: NaiveDate) -> BackendResult<DashboardSnapshot> {
        self.snapshot(date)
    }

    async fn toggle_task(&self, id: TaskId) -> BackendResult<()> {
        self.toggle(id).map(|_| ())
    }

    async fn delete_task(&self, id: TaskId) -> BackendResult<()> {
        self.delete(id)
    }

    async fn quick_add_task(&self, text: &str) -> BackendResult<()> {
        self.quick_add(text).map(|_| ())
    }

    async fn update_setting(&self, key: &str, value: serde_json::Value) -> BackendResult<()> {
        self.set_setting(key, &value)
    }
}
