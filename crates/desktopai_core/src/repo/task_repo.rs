//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/toggle/delete over the `tasks` table.
//! - Provide the upcoming-horizon query used by dashboard snapshots.
//! - Persist UI settings as JSON text.
//!
//! # Invariants
//! - Dates are stored as ISO `YYYY-MM-DD` text, so text order is date order.
//! - Day listings keep insertion order (`id ASC`).
//! - Upcoming listings exclude completed tasks and order by date, then
//!   untimed before timed, then time, then id.

use crate::db::DbError;
use crate::model::date_key::DateKey;
use crate::model::task::{NewTask, Task, TaskCategory, TaskId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    date,
    time,
    end_time,
    reminder,
    category,
    completed
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the local task store.
pub trait TaskRepository {
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn tasks_for_date(&self, date: NaiveDate) -> RepoResult<Vec<Task>>;
    fn upcoming_tasks(&self, from: NaiveDate, limit: u32) -> RepoResult<Vec<Task>>;
    /// Flips completion and returns the new state.
    fn toggle_task(&self, id: TaskId) -> RepoResult<bool>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn put_setting(&self, key: &str, value: &str) -> RepoResult<()>;
    fn get_setting(&self, key: &str) -> RepoResult<Option<String>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_tasks(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (
                title,
                date,
                time,
                end_time,
                reminder,
                category,
                completed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0);",
            params![
                task.title.as_str(),
                DateKey::from_date(task.date).to_iso(),
                task.time.as_deref(),
                task.end_time.as_deref(),
                bool_to_int(task.reminder),
                task.category.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn tasks_for_date(&self, date: NaiveDate) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE date = ?1 ORDER BY id ASC;"),
            [DateKey::from_date(date).to_iso()],
        )
    }

    fn upcoming_tasks(&self, from: NaiveDate, limit: u32) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE date >= ?1
                   AND completed = 0
                 ORDER BY date ASC, time IS NOT NULL, time ASC, id ASC
                 LIMIT ?2;"
            ),
            params![DateKey::from_date(from).to_iso(), i64::from(limit)],
        )
    }

    fn toggle_task(&self, id: TaskId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = 1 - completed WHERE id = ?1;",
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        let completed: i64 =
            self.conn
                .query_row("SELECT completed FROM tasks WHERE id = ?1;", [id], |row| {
                    row.get(0)
                })?;
        int_to_bool(completed, "tasks.completed")
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn put_setting(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_setting(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let date_text: String = row.get("date")?;
    let date = DateKey::parse_iso(&date_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{date_text}` in tasks.date")))?
        .date();

    let category_text: String = row.get("category")?;
    let category = TaskCategory::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category"
        ))
    })?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        date,
        time: row.get("time")?,
        end_time: row.get("end_time")?,
        reminder: int_to_bool(row.get("reminder")?, "tasks.reminder")?,
        category,
        completed: int_to_bool(row.get("completed")?, "tasks.completed")?,
    })
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
