//! Plain-text rendering of the calendar grid and dashboard panels.

use desktopai_core::{
    normalize_clock, schedule_header, Dashboard, GridCell, TaskRow, WeekStart, YearMonth,
};

const CELL_WIDTH: usize = 5;

/// Renders one month; `[dd]` marks today and a trailing `*` the selection.
pub fn render_calendar(month: YearMonth, week_start: WeekStart, cells: &[GridCell]) -> String {
    let mut out = String::new();
    let title = month.title();
    out.push_str(&format!("{title:^width$}\n", width = CELL_WIDTH * 7));
    for label in week_start.labels() {
        out.push_str(&format!(" {label:<3} "));
    }
    out.push('\n');

    for week in cells.chunks(7) {
        let line: String = week.iter().map(render_cell).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_cell(cell: &GridCell) -> String {
    match cell {
        GridCell::Empty => " ".repeat(CELL_WIDTH),
        GridCell::Day(day) => {
            let marker = if day.is_selected { '*' } else { ' ' };
            if day.is_today {
                format!("[{:>2}]{marker}", day.day)
            } else {
                format!(" {:>2}{marker} ", day.day)
            }
        }
    }
}

/// Renders the agenda and todo panels, with empty-state lines.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    if let Some(date) = dashboard.view_date {
        out.push_str(&schedule_header(date));
        out.push('\n');
    }

    out.push_str("Schedule:\n");
    if dashboard.is_empty_schedule() {
        out.push_str("  No events scheduled.\n");
    }
    for row in dashboard.schedule_rows() {
        out.push_str(&render_row(&row));
    }

    out.push_str("Todos:\n");
    if dashboard.is_empty_todos() {
        out.push_str("  No pending tasks.\n");
    }
    for row in dashboard.todo_rows() {
        out.push_str(&render_row(&row));
    }
    out
}

fn render_row(row: &TaskRow<'_>) -> String {
    let mut line = format!(
        "  #{:<4} [{}]",
        row.task.id,
        if row.completed { 'x' } else { ' ' }
    );
    if row.show_date {
        line.push_str(&format!(" {}", row.task.date.format("%Y-%m-%d")));
    }
    if let Some(time) = normalize_clock(row.task.time.as_deref()) {
        line.push_str(&format!(" {time}"));
    }
    line.push_str(&format!(" {}", row.task.title));
    if row.is_deadline {
        line.push_str(" (deadline)");
    }
    line.push('\n');
    line
}
