use chrono::NaiveDate;
use desktopai_core::{
    CalendarModel, CommandReply, GridCell, LocalBackend, NewTask, RefreshOutcome, TaskId,
    ViewController, YearMonth,
};
use std::sync::Arc;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 10, 19)
}

fn session() -> (Arc<LocalBackend>, ViewController<LocalBackend>) {
    let backend = Arc::new(LocalBackend::in_memory(10).unwrap().with_today(today()));
    let controller = ViewController::new(Arc::clone(&backend), CalendarModel::new(today()));
    (backend, controller)
}

fn schedule_ids(controller: &ViewController<LocalBackend>) -> Vec<TaskId> {
    controller
        .dashboard()
        .map(|dashboard| dashboard.schedule.iter().map(|task| task.id).collect())
        .unwrap_or_default()
}

fn todo_ids(controller: &ViewController<LocalBackend>) -> Vec<TaskId> {
    controller
        .dashboard()
        .map(|dashboard| dashboard.todos.iter().map(|task| task.id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn quick_add_shows_up_in_todos_and_toggle_hides_it() {
    let (_backend, mut controller) = session();

    let outcome = controller.quick_add_task("water plants").await.unwrap();
    assert_eq!(outcome, Some(RefreshOutcome::Applied));
    let ids = todo_ids(&controller);
    assert_eq!(ids.len(), 1);

    controller.toggle_task(ids[0]).await.unwrap();
    assert!(todo_ids(&controller).is_empty());
    assert!(schedule_ids(&controller).is_empty());
}

#[tokio::test]
async fn selection_change_rescopes_schedule_without_duplicates() {
    let (backend, mut controller) = session();
    let standup = backend
        .add_task(&NewTask {
            time: Some("09:00".to_string()),
            ..NewTask::untimed("standup", date(2026, 10, 21))
        })
        .unwrap();
    let review = backend
        .add_task(&NewTask::untimed("review", date(2026, 10, 25)))
        .unwrap();

    controller.refresh().await;
    assert_eq!(schedule_ids(&controller), vec![standup, review]);

    controller.select_date(date(2026, 10, 21)).await;
    assert_eq!(schedule_ids(&controller), vec![standup, review]);
    assert!(todo_ids(&controller).is_empty());

    controller.select_date(date(2026, 10, 25)).await;
    assert_eq!(schedule_ids(&controller), Vec::<TaskId>::new());
    assert_eq!(todo_ids(&controller), vec![review]);
}

#[tokio::test]
async fn delete_refreshes_dashboard() {
    let (backend, mut controller) = session();
    let id = backend.quick_add("temporary").unwrap();
    controller.refresh().await;
    assert_eq!(todo_ids(&controller), vec![id]);

    controller.delete_task(id).await.unwrap();
    assert!(todo_ids(&controller).is_empty());
    assert!(controller.delete_task(id).await.is_err());
}

#[tokio::test]
async fn december_selection_survives_navigation_into_january() {
    let (_backend, mut controller) = session();
    controller.select_date(date(2026, 12, 31)).await;
    controller.navigate_month(2).await;
    controller.navigate_month(1).await;

    let calendar = controller.calendar();
    assert_eq!(calendar.viewed_month(), YearMonth::new(2027, 1).unwrap());
    assert_eq!(calendar.selected_date(), date(2026, 12, 31));
    assert!(calendar
        .viewed_grid(today())
        .iter()
        .filter_map(GridCell::as_day)
        .all(|cell| !cell.is_selected));
    assert_eq!(
        controller.dashboard().and_then(|dashboard| dashboard.view_date),
        Some(date(2026, 12, 31))
    );
}

#[tokio::test]
async fn unsupported_commands_surface_inline_errors() {
    let (_backend, mut controller) = session();
    match controller.submit_command("play some jazz").await {
        CommandReply::Failed { message } => {
            assert!(message.starts_with("Error: "));
            assert!(message.contains("process_command"));
        }
        other => panic!("unexpected reply: {other:?}"),
    }
    assert!(controller.dashboard().is_none());
}

#[tokio::test]
async fn settings_persist_through_controller() {
    let (backend, mut controller) = session();
    controller
        .update_setting("music_source", serde_json::json!("youtube"))
        .await
        .unwrap();
    assert_eq!(
        backend.setting("music_source").unwrap(),
        Some(serde_json::json!("youtube"))
    );
}
