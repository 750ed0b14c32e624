pub mod drawer;
pub mod geometry;
pub mod requests;
pub mod sidebar;
pub mod timeline;
pub mod video;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, AppState};
use crate::colors;
use crate::constants::{
    ERROR_DIALOG_HEIGHT, ERROR_DIALOG_WIDTH, LOADING_DIALOG_HEIGHT, LOADING_DIALOG_WIDTH,
};
use crate::layout::{DividerHandle, SplitAxis};

/// What fills a layout region.
///
/// Regions either hold ready-made content or a function that draws into
/// whatever rect the layout hands out.
pub enum RegionContent<'a> {
    Static(Paragraph<'a>),
    Render(fn(&mut Frame, Rect, &App)),
}

impl RegionContent<'_> {
    pub fn draw(self, frame: &mut Frame, area: Rect, app: &App) {
        match self {
            Self::Static(paragraph) => frame.render_widget(paragraph, area),
            Self::Render(render) => render(frame, area, app),
        }
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    match &app.state {
        AppState::Loading { status } => {
            render_loading(frame, frame.area(), status);
        }
        AppState::Error { message } => {
            render_error(frame, frame.area(), message);
        }
        AppState::Ready => {
            render_ready(frame, app);
        }
    }
}

fn render_ready(frame: &mut Frame, app: &App) {
    let (screen, arrangement) = app.arrangement(frame.area());

    timeline::render(frame, screen.timeline, app);

    if let Some(area) = arrangement.video {
        RegionContent::Render(video::render).draw(frame, area, app);
    }
    if let Some(area) = arrangement.focus {
        RegionContent::Render(requests::render).draw(frame, area, app);
    }
    if let Some(area) = arrangement.sidebar {
        RegionContent::Static(sidebar::summary(app)).draw(frame, area, app);
    }
    for handle in &arrangement.dividers {
        render_divider(frame, handle, app.layout.dragging() == Some(handle.id));
    }

    render_help_bar(frame, screen.help, app);
}

fn render_divider(frame: &mut Frame, handle: &DividerHandle, dragging: bool) {
    let rect = handle.rect;
    if rect.is_empty() {
        return;
    }
    let color = if dragging {
        colors::DIVIDER_DRAGGING
    } else {
        colors::DIVIDER_IDLE
    };
    let (glyph, grip) = match handle.axis {
        SplitAxis::Horizontal => ("│", "┃"),
        SplitAxis::Vertical => ("─", "━"),
    };
    let lines: Vec<Line> = match handle.axis {
        SplitAxis::Horizontal => (0..rect.height)
            .map(|y| {
                let g = if y == rect.height / 2 { grip } else { glyph };
                Line::from(g.repeat(usize::from(rect.width)))
            })
            .collect(),
        SplitAxis::Vertical => (0..rect.height)
            .map(|_| {
                let mid = usize::from(rect.width / 2);
                let text: String = (0..usize::from(rect.width))
                    .map(|x| if x.abs_diff(mid) <= 1 { grip } else { glyph })
                    .collect();
                Line::from(text)
            })
            .collect(),
    };
    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(color)), rect);
}

/// Bordered pane with the active/inactive border color.
pub fn pane_block(title: String, is_active: bool) -> Block<'static> {
    let color = if is_active {
        colors::BORDER_ACTIVE
    } else {
        colors::BORDER_INACTIVE
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_loading(frame: &mut Frame, area: Rect, status: &str) {
    let block = Block::default()
        .title(" Loading Replay ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let spinner_frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner_idx = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() / 100)
        .unwrap_or(0) as usize)
        % spinner_frames.len();

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                spinner_frames[spinner_idx],
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(status),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+C twice to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(
        paragraph,
        centered_rect(LOADING_DIALOG_WIDTH, LOADING_DIALOG_HEIGHT, area),
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'r' to retry or 'q' to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(
        paragraph,
        centered_rect(ERROR_DIALOG_WIDTH, ERROR_DIALOG_HEIGHT, area),
    );
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn help(key: &str, action: &str) -> [Span<'static>; 2] {
    [
        Span::styled(format!(" {key} "), Style::default().fg(Color::Yellow)),
        Span::raw(format!("{action} ")),
    ]
}

fn render_help_bar(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.quit_pending {
        Line::from(Span::styled(
            "Press Ctrl+C again to quit",
            Style::default().fg(Color::White),
        ))
    } else if app.filter.active {
        let mut spans = vec![Span::styled(
            "-- FILTER -- ",
            Style::default().fg(Color::DarkGray),
        )];
        spans.extend(help("Enter/Esc", "done"));
        Line::from(spans)
    } else {
        let mut spans = vec![];
        spans.extend(help("space", "play"));
        spans.extend(help("←/→", "seek"));
        spans.extend(help("j/k", "move"));
        spans.extend(help("Enter", "details"));
        spans.extend(help("/", "filter"));
        spans.extend(help("s/S", "sort"));
        if app.table.jump_buttons(app.context.session_start_ms, app.clock.current_ms()).target.is_some() {
            spans.extend(help("u/d", "jump"));
        }
        spans.extend(help("L", app.layout.variant().label()));
        if app.layout.variant().has_video() {
            spans.extend(help("f", "fullscreen"));
        }
        spans.extend(help("q", "quit"));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(help_text), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingAnalytics;
    use crate::context::ViewContext;
    use crate::layout::LayoutVariant;
    use crate::location::Location;
    use crate::settings::Settings;
    use crate::source::Recording;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app_with(variant: LayoutVariant) -> App {
        let settings = Settings {
            layout: variant,
            ..Settings::default()
        };
        let mut app = App::new(
            settings,
            ViewContext::default(),
            Location::for_replay("r1").unwrap(),
            Box::new(RecordingAnalytics::default()),
        );
        app.persist_settings = false;
        app.set_ready(Recording::mock());
        app
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        app.sync(Rect::new(0, 0, width, height));
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_topbar_renders_all_regions() {
        let mut app = app_with(LayoutVariant::Topbar);
        let screen = text(&draw(&mut app, 120, 40));
        assert!(screen.contains("Replay"));
        assert!(screen.contains("Network"));
        assert!(screen.contains("Session"));
        assert!(screen.contains("Method"));
    }

    #[test]
    fn test_nothing_placed_before_measurement() {
        let app = app_with(LayoutVariant::Topbar);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen = text(terminal.backend().buffer());
        assert!(!screen.contains("Session"));
        assert!(!screen.contains("Network"));
    }

    #[test]
    fn test_video_only_has_no_table() {
        let mut app = app_with(LayoutVariant::VideoOnly);
        let screen = text(&draw(&mut app, 120, 40));
        assert!(screen.contains("Replay"));
        assert!(!screen.contains("Network"));
    }

    #[test]
    fn test_open_row_shows_drawer_tabs() {
        let mut app = app_with(LayoutVariant::NoVideo);
        app.toggle_row(0);
        let screen = text(&draw(&mut app, 120, 40));
        assert!(screen.contains("Details"));
        assert!(screen.contains("Request"));
        assert!(screen.contains("Response"));
    }

    #[test]
    fn test_loading_and_error_dialogs() {
        let mut app = app_with(LayoutVariant::Topbar);
        app.set_loading_status("Fetching frames".to_string());
        assert!(text(&draw(&mut app, 100, 30)).contains("Fetching frames"));

        app.set_error("boom".to_string());
        assert!(text(&draw(&mut app, 100, 30)).contains("boom"));
    }

    #[test]
    fn test_empty_filter_message() {
        let mut app = app_with(LayoutVariant::NoVideo);
        app.table.set_search("definitely-not-a-request");
        let screen = text(&draw(&mut app, 120, 40));
        assert!(screen.contains("No requests match"));
    }
}
