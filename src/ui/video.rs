use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::network::format_offset;

use super::pane_block;

/// The replay viewport. There is no recorded video to paint in a terminal,
/// so it shows the playback position and the request in flight.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.layout.is_fullscreen() {
        " Replay (fullscreen) ".to_string()
    } else {
        " Replay ".to_string()
    };
    let block = pane_block(title, app.layout.is_fullscreen());

    let clock = &app.clock;
    let start = app.context.session_start_ms;
    let now = clock.current_ms();

    // Latest request that started at or before the playhead.
    let latest = app
        .table
        .frames()
        .unwrap_or_default()
        .iter()
        .filter(|f| f.offset_ms(start) <= now)
        .max_by(|a, b| a.start_timestamp.total_cmp(&b.start_timestamp));

    let state = if clock.is_playing() { "▶ playing" } else { "⏸ paused" };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_offset(now),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state, Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    match latest {
        Some(f) => {
            lines.push(Line::from(vec![
                Span::styled(f.method().to_string(), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::raw(f.path().to_string()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("{} · {}", f.status(), f.resource_type()),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No requests yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
