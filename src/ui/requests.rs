//! Network request table: filter bar, virtualized grid and detail drawer.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::App;
use crate::colors;
use crate::network::{COLUMN_COUNT, Column, NetworkFrame, RowBands, TableView};

use super::geometry::FocusGeometry;
use super::{drawer, pane_block};

const JUMP_UP_LABEL: &str = " ↑ Jump to now";
const JUMP_DOWN_LABEL: &str = " ↓ Jump to now";

/// Truncate or pad `text` to `width` cells, keeping the last cell as a gap.
fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if width == 0 {
        return String::new();
    }
    let room = width - 1;
    let count = text.chars().count();
    let mut out: String = if count > room && room > 0 {
        text.chars().take(room - 1).chain(std::iter::once('…')).collect()
    } else {
        text.chars().take(room).collect()
    };
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.table.frames().map(<[_]>::len).unwrap_or(0);
    let title = format!(" Network ({}/{}) ", app.table.row_count(), total);
    frame.render_widget(pane_block(title, app.filter.active), area);

    let geometry = app.focus_geometry(area);
    render_filter_bar(frame, geometry.filter, app);

    match app.table.view() {
        TableView::Loading => render_message(
            frame,
            geometry.grid,
            "Loading network requests...",
            None,
        ),
        TableView::Empty { filtered: true } => render_message(
            frame,
            geometry.grid,
            "No requests match the current filters",
            Some("Press 'c' to clear filters"),
        ),
        TableView::Empty { filtered: false } => {
            render_message(frame, geometry.grid, "No network requests recorded", None)
        }
        TableView::Rows => {
            render_grid(frame, &geometry, app);
            render_jump_buttons(frame, &geometry, app);
        }
    }

    if let (Some(handle), Some(drawer_area), Some(index)) = (
        geometry.handle,
        geometry.drawer,
        app.table.selected(&app.location),
    ) {
        drawer::render_handle(frame, handle, app.table.drawer.is_dragging());
        if let Some(request) = app.table.row(index) {
            drawer::render(frame, drawer_area, app, request);
        }
    }
}

fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    if area.is_empty() {
        return;
    }
    if app.filter.active {
        frame.render_widget(&app.filter.textarea, area);
        return;
    }

    let filters = app.table.filters();
    let mut spans = if app.filter.is_empty() {
        vec![Span::styled(
            "/ Search requests",
            Style::default().fg(colors::FILTER_PLACEHOLDER),
        )]
    } else {
        vec![
            Span::styled("/ ", Style::default().fg(colors::FILTER_PLACEHOLDER)),
            Span::styled(app.filter.text(), Style::default().fg(colors::FILTER_ACTIVE)),
        ]
    };
    for value in filters.types().iter().chain(filters.statuses()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{value}]"),
            Style::default().fg(colors::SORT_INDICATOR),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, hint: Option<&str>) {
    if area.is_empty() {
        return;
    }
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
    ];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn header_line(widths: &[u16; COLUMN_COUNT], app: &App) -> Line<'static> {
    let sort = app.table.sort();
    let spans: Vec<Span> = Column::ALL
        .iter()
        .zip(widths)
        .map(|(column, width)| {
            let label = if *column == sort.by {
                format!("{}{}", column.title(), sort.direction.arrow())
            } else {
                column.title().to_string()
            };
            let color = if *column == sort.by {
                colors::SORT_INDICATOR
            } else {
                colors::HEADER_FG
            };
            Span::styled(
                fit(&label, *width),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

fn row_line(
    request: &NetworkFrame,
    widths: &[u16; COLUMN_COUNT],
    bands: RowBands,
    background: Option<Color>,
    session_start_ms: f64,
) -> Line<'static> {
    let fg = if bands.before_current {
        colors::ROW_BEFORE_CURRENT
    } else {
        colors::ROW_AFTER_CURRENT
    };
    let base = match background {
        Some(bg) => Style::default().fg(fg).bg(bg),
        None => Style::default().fg(fg),
    };

    let spans: Vec<Span> = Column::ALL
        .iter()
        .zip(widths)
        .map(|(column, width)| {
            let text = fit(&column.cell(request, session_start_ms), *width);
            let style = match column {
                Column::Status if request.is_error() => base.fg(colors::ROW_ERROR_STATUS),
                Column::Timestamp if bands.before_hover == Some(true) => {
                    base.fg(colors::ROW_BEFORE_HOVER)
                }
                _ => base,
            };
            Span::styled(text, style)
        })
        .collect();
    Line::from(spans)
}

fn render_grid(frame: &mut Frame, geometry: &FocusGeometry, app: &App) {
    let area = geometry.grid;
    if area.is_empty() {
        return;
    }
    let table = &app.table;
    let rows = table.row_count();
    let widths = table.column_widths(area.width);
    let start = app.context.session_start_ms;
    let current = app.clock.current_ms();
    let hover = app.clock.hover_ms();
    let selected = table.selected(&app.location);

    let header_height = table.grid.metrics().header_height.min(area.height);
    frame.render_widget(
        Paragraph::new(header_line(&widths, app)),
        Rect::new(area.x, area.y, area.width, header_height),
    );

    let visible = table.grid.visible_range(rows);
    let shown: Vec<Line> = visible
        .clone()
        .filter_map(|index| {
            let request = table.row(index)?;
            let bands = table.bands(index, start, current, hover)?;
            let background = if selected == Some(index) {
                Some(colors::ROW_SELECTED_BG)
            } else if index == table.cursor() {
                Some(colors::ROW_CURSOR_BG)
            } else {
                None
            };
            Some(row_line(request, &widths, bands, background, start))
        })
        .collect();

    let body = Rect::new(
        area.x,
        area.y + header_height,
        area.width,
        area.height - header_height,
    );
    frame.render_widget(Paragraph::new(shown), body);

    if rows > visible.len() {
        let mut state = ScrollbarState::new(table.grid_row_count())
            .position(table.grid.scroll())
            .viewport_content_length(visible.len());
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            body,
            &mut state,
        );
    }
}

fn render_jump_buttons(frame: &mut Frame, geometry: &FocusGeometry, app: &App) {
    let buttons = app
        .table
        .jump_buttons(app.context.session_start_ms, app.clock.current_ms());
    let style = Style::default()
        .fg(colors::JUMP_BUTTON_FG)
        .bg(colors::JUMP_BUTTON_BG)
        .add_modifier(Modifier::BOLD);
    if buttons.up && !geometry.jump_up.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(JUMP_UP_LABEL, style)),
            geometry.jump_up,
        );
    }
    if buttons.down && !geometry.jump_down.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(JUMP_DOWN_LABEL, style)),
            geometry.jump_down,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("GET", 7), "GET    ");
        assert_eq!(fit("/api/0/projects/", 8), "/api/0… ");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("abc", 1), " ");
    }
}
