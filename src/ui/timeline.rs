use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::colors;
use crate::network::format_offset;

use super::geometry::timeline_bar;
use super::pane_block;

/// Column on the bar for a session time.
fn column_for(bar: Rect, ms: f64, duration_ms: f64) -> u16 {
    if duration_ms <= 0.0 || bar.width == 0 {
        return 0;
    }
    let ratio = (ms / duration_ms).clamp(0.0, 1.0);
    (ratio * f64::from(bar.width.saturating_sub(1))).round() as u16
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let clock = &app.clock;
    let state = if clock.is_playing() { "▶" } else { "⏸" };
    let mut title = format!(
        " {state} {} / {} ",
        format_offset(clock.current_ms()),
        format_offset(clock.duration_ms())
    );
    if let Some(hover) = clock.hover_ms() {
        title.push_str(&format!("· {} ", format_offset(hover)));
    }

    let block = pane_block(title, false);
    frame.render_widget(block, area);

    let bar = timeline_bar(area);
    if bar.is_empty() {
        return;
    }

    let duration = clock.duration_ms();
    let played = (clock.progress() * f64::from(bar.width.saturating_sub(1))).round() as u16;
    let hover = clock.hover_ms().map(|ms| column_for(bar, ms, duration));

    // Error requests are marked on the bar so they can be found by scrubbing.
    let mut errors = vec![false; usize::from(bar.width)];
    for frame_data in app.table.frames().unwrap_or_default() {
        if frame_data.is_error() {
            let offset = frame_data.offset_ms(app.context.session_start_ms);
            let col = usize::from(column_for(bar, offset, duration));
            if let Some(slot) = errors.get_mut(col) {
                *slot = true;
            }
        }
    }

    let spans: Vec<Span> = (0..bar.width)
        .map(|col| {
            let color = if col <= played {
                colors::TIMELINE_PLAYED
            } else {
                colors::TIMELINE_REMAINING
            };
            if Some(col) == hover {
                Span::styled(
                    "┃",
                    Style::default()
                        .fg(colors::TIMELINE_HOVER)
                        .add_modifier(Modifier::BOLD),
                )
            } else if errors[usize::from(col)] {
                Span::styled("▲", Style::default().fg(colors::ROW_ERROR_STATUS))
            } else {
                Span::styled("━", Style::default().fg(color))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), bar);
}
