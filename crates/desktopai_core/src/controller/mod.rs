//! View controller wiring gestures to calendar state and the backend.
//!
//! # Responsibility
//! - Own the session `CalendarModel` and the last rendered dashboard.
//! - Run mutation → fetch → reconcile on every state-changing gesture.
//! - Discard snapshots that resolve after a newer request was issued.
//!
//! # Invariants
//! - Only the newest refresh ticket can replace the rendered dashboard, and
//!   only while its date still equals the selected date.
//! - A failed refresh keeps the previously rendered dashboard.
//! - Calendar mutations and reconciliation never suspend; only backend
//!   calls do.

use crate::backend::{AssistantBackend, BackendError, BackendResult};
use crate::calendar::CalendarModel;
use crate::dashboard::{reconcile, Dashboard, DashboardSnapshot};
use crate::model::task::TaskId;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

/// Reply fragments that mean a command changed task data.
const TASK_CHANGE_MARKERS: &[&str] = &["Scheduled", "Added", "deadline"];

/// Identity of one in-flight snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    token: u64,
    date: NaiveDate,
}

impl RefreshTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Selected date the request was issued for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Result of resolving one refresh ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot reconciled and now rendered.
    Applied,
    /// A newer request or selection superseded this one.
    Stale,
    /// Backend failed; the previous dashboard stays rendered.
    Failed,
}

/// Result of a chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Blank input; nothing was sent.
    Ignored,
    Response {
        text: String,
        /// Whether the dashboard was re-fetched after the reply.
        refreshed: bool,
    },
    /// Inline error shown in place of a response.
    Failed { message: String },
}

/// Single-session controller over one backend.
pub struct ViewController<B: AssistantBackend> {
    backend: Arc<B>,
    calendar: CalendarModel,
    last_token: u64,
    rendered: Option<Dashboard>,
}

impl<B: AssistantBackend> ViewController<B> {
    pub fn new(backend: Arc<B>, calendar: CalendarModel) -> Self {
        Self {
            backend,
            calendar,
            last_token: 0,
            rendered: None,
        }
    }

    pub fn calendar(&self) -> &CalendarModel {
        &self.calendar
    }

    /// Last successfully reconciled dashboard, if any.
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.rendered.as_ref()
    }

    /// Issues a ticket for the current selection.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.last_token += 1;
        RefreshTicket {
            token: self.last_token,
            date: self.calendar.selected_date(),
        }
    }

    /// Resolves `ticket` with the backend result.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: BackendResult<DashboardSnapshot>,
    ) -> RefreshOutcome {
        if ticket.token != self.last_token || ticket.date != self.calendar.selected_date() {
            debug!(
                "event=dashboard_refresh module=controller status=stale token={} latest={} date={}",
                ticket.token, self.last_token, ticket.date
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                let dashboard = reconcile(&snapshot);
                info!(
                    "event=dashboard_refresh module=controller status=ok token={} date={} schedule={} todos={}",
                    ticket.token,
                    ticket.date,
                    dashboard.schedule.len(),
                    dashboard.todos.len()
                );
                self.rendered = Some(dashboard);
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(
                    "event=dashboard_refresh module=controller status=error token={} date={} error={err}",
                    ticket.token, ticket.date
                );
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetches and reconciles the dashboard for the selected date.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = self.backend.get_dashboard_data(ticket.date).await;
        self.finish_refresh(ticket, result)
    }

    pub async fn select_date(&mut self, date: NaiveDate) -> RefreshOutcome {
        self.calendar.select_date(date);
        self.refresh().await
    }

    pub async fn navigate_month(&mut self, delta: i32) -> RefreshOutcome {
        self.calendar.navigate_month(delta);
        self.refresh().await
    }

    /// Toggles completion, then refreshes.
    ///
    /// # Errors
    /// - Returns the backend error; no refresh happens in that case.
    pub async fn toggle_task(&mut self, id: TaskId) -> BackendResult<RefreshOutcome> {
        let result = self.backend.toggle_task(id).await;
        self.after_mutation("task_toggle", result).await
    }

    /// Deletes a task, then refreshes.
    pub async fn delete_task(&mut self, id: TaskId) -> BackendResult<RefreshOutcome> {
        let result = self.backend.delete_task(id).await;
        self.after_mutation("task_delete", result).await
    }

    /// Quick-adds a task, then refreshes. Blank text is a no-op.
    pub async fn quick_add_task(&mut self, text: &str) -> BackendResult<Option<RefreshOutcome>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let result = self.backend.quick_add_task(text).await;
        self.after_mutation("task_quick_add", result).await.map(Some)
    }

    /// Persists a setting; the dashboard is left as is.
    pub async fn update_setting(
        &mut self,
        key: &str,
        value: serde_json::Value,
    ) -> BackendResult<()> {
        self.backend.update_setting(key, value).await.map_err(|err| {
            warn!("event=setting_update module=controller status=error key={key} error={err}");
            err
        })
    }

    /// Sends a chat command and refreshes when the reply reports a change.
    pub async fn submit_command(&mut self, text: &str) -> CommandReply {
        let text = text.trim();
        if text.is_empty() {
            return CommandReply::Ignored;
        }

        match self.backend.process_command(text).await {
            Ok(response) => {
                let refreshed = response_reports_task_change(&response);
                if refreshed {
                    self.refresh().await;
                }
                CommandReply::Response {
                    text: response,
                    refreshed,
                }
            }
            Err(err) => {
                warn!("event=command module=controller status=error error={err}");
                CommandReply::Failed {
                    message: format!("Error: {err}"),
                }
            }
        }
    }

    async fn after_mutation(
        &mut self,
        event: &'static str,
        result: Result<(), BackendError>,
    ) -> BackendResult<RefreshOutcome> {
        if let Err(err) = result {
            warn!("event={event} module=controller status=error error={err}");
            return Err(err);
        }
        Ok(self.refresh().await)
    }
}

/// Returns whether a command reply implies task data changed.
pub fn response_reports_task_change(response: &str) -> bool {
    TASK_CHANGE_MARKERS
        .iter()
        .any(|marker| response.contains(marker))
}
