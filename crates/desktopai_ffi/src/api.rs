//! FFI use-case API for the shell UI host.
//!
//! # Responsibility
//! - Expose calendar grid, dashboard and task actions to Dart via FRB.
//! - Flatten core types into plain envelopes with stable field meaning.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary only as ISO `YYYY-MM-DD` strings.

use desktopai_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, normalize_clock,
    ping as ping_inner, reconcile, schedule_header, CalendarModel, DateKey, GridCell,
    LocalBackend, ShellConfig, TaskId, TaskRow, YearMonth,
};
use log::warn;
use std::sync::OnceLock;

static SHELL_CONFIG: OnceLock<ShellConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One calendar grid cell; `day = None` marks a leading placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    pub day: Option<u32>,
    /// ISO date of the cell; empty for placeholders.
    pub date: String,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Month grid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGridResponse {
    pub ok: bool,
    /// Header title such as `October 2026`.
    pub title: String,
    /// Weekday labels in column order.
    pub weekdays: Vec<String>,
    pub cells: Vec<CalendarCellItem>,
    pub message: String,
}

impl CalendarGridResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            title: String::new(),
            weekdays: Vec::new(),
            cells: Vec::new(),
            message: message.into(),
        }
    }
}

/// One task row for the schedule or todo panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub category: String,
    pub completed: bool,
    pub is_deadline: bool,
    pub show_date: bool,
}

/// Reconciled dashboard envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    /// Agenda header, e.g. `Schedule for Mon Oct 19 2026`.
    pub header: String,
    pub schedule: Vec<TaskItem>,
    pub todos: Vec<TaskItem>,
    pub message: String,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            header: String::new(),
            schedule: Vec::new(),
            todos: Vec::new(),
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn from_result(operation: &str, result: Result<String, String>) -> Self {
        match result {
            Ok(message) => Self { ok: true, message },
            Err(err) => Self {
                ok: false,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Lays out one month for the calendar panel.
///
/// `today_iso` defaults to the host's local date when `None`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; malformed input yields `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_grid(
    year: i32,
    month: u32,
    selected_iso: String,
    today_iso: Option<String>,
) -> CalendarGridResponse {
    let Some(month) = YearMonth::new(year, month) else {
        return CalendarGridResponse::failure(format!("invalid month {year}-{month}"));
    };
    let selected = match DateKey::parse_iso(&selected_iso) {
        Ok(key) => key.date(),
        Err(err) => return CalendarGridResponse::failure(err.to_string()),
    };
    let today = match today_iso.as_deref().map(DateKey::parse_iso).transpose() {
        Ok(Some(key)) => key.date(),
        Ok(None) => desktopai_core::local_today(),
        Err(err) => return CalendarGridResponse::failure(err.to_string()),
    };

    let calendar = CalendarModel::new(selected).with_week_start(shell_config().week_start);
    let cells = calendar
        .grid_layout(month, today)
        .iter()
        .map(to_calendar_cell_item)
        .collect();

    CalendarGridResponse {
        ok: true,
        title: month.title(),
        weekdays: calendar
            .week_start()
            .labels()
            .iter()
            .map(|label| label.to_string())
            .collect(),
        cells,
        message: String::new(),
    }
}

/// Fetches and reconciles the dashboard for one date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures yield `ok = false` with empty lists.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_for_date(date_iso: String) -> DashboardResponse {
    let date = match DateKey::parse_iso(&date_iso) {
        Ok(key) => key.date(),
        Err(err) => return DashboardResponse::failure(err.to_string()),
    };

    let snapshot = open_backend()
        .and_then(|backend| backend.snapshot(date).map_err(|err| err.to_string()));
    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!("event=ffi_dashboard module=ffi status=error date={date} error={err}");
            return DashboardResponse::failure(format!("dashboard_for_date failed: {err}"));
        }
    };

    let dashboard = reconcile(&snapshot);
    DashboardResponse {
        ok: true,
        header: schedule_header(date),
        schedule: dashboard.schedule_rows().iter().map(to_task_item).collect(),
        todos: dashboard.todo_rows().iter().map(to_task_item).collect(),
        message: String::new(),
    }
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(id: TaskId) -> ActionResponse {
    let result = open_backend().and_then(|backend| {
        backend
            .toggle(id)
            .map(|completed| {
                if completed {
                    "Task completed.".to_string()
                } else {
                    "Task reopened.".to_string()
                }
            })
            .map_err(|err| err.to_string())
    });
    ActionResponse::from_result("toggle_task", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: TaskId) -> ActionResponse {
    let result = open_backend().and_then(|backend| {
        backend
            .delete(id)
            .map(|()| "Task deleted.".to_string())
            .map_err(|err| err.to_string())
    });
    ActionResponse::from_result("delete_task", result)
}

/// Creates an untimed task for today from free text.
#[flutter_rust_bridge::frb(sync)]
pub fn quick_add_task(text: String) -> ActionResponse {
    let result = open_backend().and_then(|backend| {
        backend
            .quick_add(&text)
            .map(|_| "Task added.".to_string())
            .map_err(|err| err.to_string())
    });
    ActionResponse::from_result("quick_add_task", result)
}

/// Persists one setting; `json_value` must be valid JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn update_setting(key: String, json_value: String) -> ActionResponse {
    let result = serde_json::from_str::<serde_json::Value>(&json_value)
        .map_err(|err| format!("value is not JSON: {err}"))
        .and_then(|value| {
            open_backend().and_then(|backend| {
                backend
                    .set_setting(&key, &value)
                    .map(|()| "Setting saved.".to_string())
                    .map_err(|err| err.to_string())
            })
        });
    ActionResponse::from_result("update_setting", result)
}

fn shell_config() -> &'static ShellConfig {
    SHELL_CONFIG.get_or_init(|| {
        ShellConfig::from_env().unwrap_or_else(|err| {
            warn!("event=ffi_config module=ffi status=error error={err}");
            ShellConfig::default()
        })
    })
}

fn open_backend() -> Result<LocalBackend, String> {
    LocalBackend::from_config(shell_config())
        .map_err(|err| format!("task store open failed: {err}"))
}

fn to_calendar_cell_item(cell: &GridCell) -> CalendarCellItem {
    match cell {
        GridCell::Empty => CalendarCellItem {
            day: None,
            date: String::new(),
            is_today: false,
            is_selected: false,
        },
        GridCell::Day(day) => CalendarCellItem {
            day: Some(day.day),
            date: DateKey::from_date(day.date).to_iso(),
            is_today: day.is_today,
            is_selected: day.is_selected,
        },
    }
}

fn to_task_item(row: &TaskRow<'_>) -> TaskItem {
    TaskItem {
        id: row.task.id,
        title: row.task.title.clone(),
        date: DateKey::from_date(row.task.date).to_iso(),
        time: normalize_clock(row.task.time.as_deref()),
        category: row.task.category.as_str().to_string(),
        completed: row.completed,
        is_deadline: row.is_deadline,
        show_date: row.show_date,
    }
}
