//! Schedule/todo reconciliation for one dashboard snapshot.
//!
//! # Invariants
//! - Cross-list duplicates are removed by identifier only, never by
//!   date, time or title.
//! - Backend order is preserved; nothing is re-sorted.
//! - Runs in time linear to the snapshot size.

use super::{Dashboard, DashboardSnapshot};
use crate::model::task::{Task, TaskId};
use std::collections::HashSet;

/// Merges day tasks and upcoming tasks into the two dashboard lists.
///
/// `schedule` is the day's timed tasks followed by upcoming tasks whose id
/// is not already in the day set (completed and untimed day tasks count).
/// `todos` is the day's untimed pending tasks. Completed untimed tasks
/// appear in neither list.
///
/// Duplicates inside `upcoming` itself are passed through as supplied.
pub fn reconcile(snapshot: &DashboardSnapshot) -> Dashboard {
    let day_ids: HashSet<TaskId> = snapshot.tasks.iter().map(|task| task.id).collect();

    let mut schedule: Vec<Task> = snapshot
        .tasks
        .iter()
        .filter(|task| task.is_timed())
        .cloned()
        .collect();
    schedule.extend(
        snapshot
            .upcoming
            .iter()
            .filter(|task| !day_ids.contains(&task.id))
            .cloned(),
    );

    let todos = snapshot
        .tasks
        .iter()
        .filter(|task| task.is_untimed_pending())
        .cloned()
        .collect();

    Dashboard {
        view_date: Some(snapshot.view_date),
        schedule,
        todos,
    }
}

#[cfg(test)]
mod tests {
    use super::reconcile;
    use crate::dashboard::{schedule_header, DashboardSnapshot};
    use crate::model::task::{Task, TaskCategory, TaskId};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn ids(tasks: &[Task]) -> Vec<TaskId> {
        tasks.iter().map(|task| task.id).collect()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    #[test]
    fn timed_day_tasks_precede_upcoming_and_day_duplicates_are_dropped() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![
                Task::new(1, "standup", today()).with_time("09:00"),
                Task::new(2, "buy milk", today()),
            ],
            upcoming: vec![
                Task::new(1, "standup", today()).with_time("09:00"),
                Task::new(3, "report", date(2026, 10, 23)),
            ],
        };

        let dashboard = reconcile(&snapshot);
        assert_eq!(ids(&dashboard.schedule), vec![1, 3]);
        assert_eq!(ids(&dashboard.todos), vec![2]);
        assert_eq!(dashboard.view_date, Some(today()));
    }

    #[test]
    fn empty_snapshot_yields_empty_lists() {
        let dashboard = reconcile(&DashboardSnapshot::empty(today()));
        assert!(dashboard.is_empty_schedule());
        assert!(dashboard.is_empty_todos());
    }

    #[test]
    fn completed_untimed_tasks_are_hidden_everywhere() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![Task::new(5, "done already", today()).with_completed(true)],
            upcoming: vec![Task::new(5, "done already", today()).with_completed(true)],
        };

        let dashboard = reconcile(&snapshot);
        assert!(dashboard.schedule.is_empty());
        assert!(dashboard.todos.is_empty());
    }

    #[test]
    fn completed_timed_tasks_stay_in_schedule() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![Task::new(7, "gym", today())
                .with_time("18:00")
                .with_completed(true)],
            upcoming: Vec::new(),
        };

        let dashboard = reconcile(&snapshot);
        assert_eq!(ids(&dashboard.schedule), vec![7]);
        assert!(dashboard.schedule_rows()[0].completed);
    }

    #[test]
    fn upcoming_sharing_date_but_not_id_is_kept() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![Task::new(1, "same title", today()).with_time("10:00")],
            upcoming: vec![Task::new(2, "same title", today()).with_time("10:00")],
        };

        let dashboard = reconcile(&snapshot);
        assert_eq!(ids(&dashboard.schedule), vec![1, 2]);
    }

    #[test]
    fn upcoming_order_is_preserved_as_supplied() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: Vec::new(),
            upcoming: vec![
                Task::new(9, "later", date(2026, 12, 1)),
                Task::new(4, "sooner", date(2026, 10, 20)),
            ],
        };

        assert_eq!(ids(&reconcile(&snapshot).schedule), vec![9, 4]);
    }

    #[test]
    fn blank_time_counts_as_untimed() {
        let snapshot: DashboardSnapshot = serde_json::from_value(serde_json::json!({
            "view_date": "2026-10-19",
            "tasks": [
                {"id": 1, "title": "call mom", "date": "2026-10-19", "time": "", "completed": false},
                {"id": 2, "title": "gym", "date": "2026-10-19", "time": "  ", "completed": true}
            ],
            "upcoming": []
        }))
        .expect("snapshot json");

        let dashboard = reconcile(&snapshot);
        assert!(dashboard.schedule.is_empty());
        assert_eq!(ids(&dashboard.todos), vec![1]);
    }

    #[test]
    fn upcoming_internal_duplicates_pass_through() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: Vec::new(),
            upcoming: vec![
                Task::new(5, "twice", date(2026, 10, 22)),
                Task::new(5, "twice", date(2026, 10, 22)),
            ],
        };

        assert_eq!(ids(&reconcile(&snapshot).schedule), vec![5, 5]);
    }

    #[test]
    fn reconcile_is_idempotent_and_has_no_schedule_duplicates() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![
                Task::new(1, "a", today()).with_time("08:00"),
                Task::new(2, "b", today()),
                Task::new(3, "c", today()).with_completed(true),
            ],
            upcoming: vec![
                Task::new(2, "b", today()),
                Task::new(3, "c", today()),
                Task::new(4, "d", date(2026, 10, 21)),
            ],
        };

        let first = reconcile(&snapshot);
        let second = reconcile(&snapshot);
        assert_eq!(first, second);

        let unique: HashSet<TaskId> = ids(&first.schedule).into_iter().collect();
        assert_eq!(unique.len(), first.schedule.len());
        assert_eq!(ids(&first.schedule), vec![1, 4]);
        assert!(first
            .todos
            .iter()
            .all(|task| !task.completed && task.time.is_none()));
    }

    #[test]
    fn rows_carry_display_flags() {
        let snapshot = DashboardSnapshot {
            view_date: today(),
            tasks: vec![Task::new(2, "pay rent", today()).with_category(TaskCategory::Deadline)],
            upcoming: vec![Task::new(8, "ship", date(2026, 11, 2))
                .with_category(TaskCategory::Deadline)],
        };

        let dashboard = reconcile(&snapshot);
        let schedule_rows = dashboard.schedule_rows();
        assert_eq!(schedule_rows.len(), 1);
        assert!(schedule_rows[0].show_date);
        assert!(schedule_rows[0].is_deadline);

        let todo_rows = dashboard.todo_rows();
        assert!(!todo_rows[0].show_date);
        assert!(todo_rows[0].is_deadline);
    }

    #[test]
    fn schedule_header_uses_short_date_form() {
        assert_eq!(schedule_header(today()), "Schedule for Mon Oct 19 2026");
        assert_eq!(
            schedule_header(date(2026, 11, 5)),
            "Schedule for Thu Nov 05 2026"
        );
    }
}
