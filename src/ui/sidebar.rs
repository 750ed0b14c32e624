use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::colors;
use crate::network::{SortDirection, format_offset};

use super::pane_block;

fn field(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(colors::DETAIL_KEY)),
        Span::raw(value),
    ])
}

/// Session summary pane. Built up front since it needs no layout geometry.
pub fn summary(app: &App) -> Paragraph<'static> {
    let block = pane_block(" Session ".to_string(), false);
    let frames = app.table.frames().unwrap_or_default();
    let errors = frames.iter().filter(|f| f.is_error()).count();
    let filters = app.table.filters();
    let sort = app.table.sort();

    let mut lines = vec![
        field("Replay", app.context.replay_id.clone()),
        field(
            "Project",
            format!("{}/{}", app.context.organization, app.context.project_id),
        ),
        field("Duration", format_offset(app.clock.duration_ms())),
        field("Layout", app.layout.variant().label().to_string()),
        Line::from(""),
        field(
            "Requests",
            format!("{} shown of {}", app.table.row_count(), frames.len()),
        ),
        Line::from(vec![
            Span::styled("Errors: ", Style::default().fg(colors::DETAIL_KEY)),
            Span::styled(
                errors.to_string(),
                Style::default().fg(if errors > 0 {
                    colors::ROW_ERROR_STATUS
                } else {
                    Color::White
                }),
            ),
        ]),
        field(
            "Sort",
            format!(
                "{} {}",
                sort.by.title(),
                match sort.direction {
                    SortDirection::Ascending => "ascending",
                    SortDirection::Descending => "descending",
                }
            ),
        ),
    ];

    if !filters.types().is_empty() {
        let types: Vec<&str> = filters.types().iter().map(String::as_str).collect();
        lines.push(field("Type", types.join(", ")));
    }
    if !filters.statuses().is_empty() {
        let statuses: Vec<&str> = filters.statuses().iter().map(String::as_str).collect();
        lines.push(field("Status", statuses.join(", ")));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.location.path_and_query(),
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
}
