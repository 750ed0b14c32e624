use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
};

use crate::app::App;
use crate::colors;
use crate::network::{
    DetailTab, NetworkBody, NetworkFrame, format_bytes, format_duration, format_offset,
};

/// Row between the grid and the drawer, dragged to resize.
pub fn render_handle(frame: &mut Frame, area: Rect, dragging: bool) {
    let color = if dragging {
        colors::DIVIDER_DRAGGING
    } else {
        colors::DRAWER_HANDLE
    };
    let width = usize::from(area.width);
    let grip = "═".repeat(width.min(9));
    let side = width.saturating_sub(grip.chars().count()) / 2;
    let line = format!("{}{}{}", "─".repeat(side), grip, "─".repeat(side));
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(color)),
        area,
    );
}

/// Tab whose title is under `column` in the tab row of `area`.
pub fn tab_at(column: u16, area: Rect) -> Option<DetailTab> {
    // Tabs renders " Title " separated by a one-cell divider.
    let mut x = area.x;
    for tab in DetailTab::ALL {
        let width = tab.title().len() as u16 + 2;
        if column >= x && column < x + width {
            return Some(tab);
        }
        x += width + 1;
    }
    None
}

fn field(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:<10}"), Style::default().fg(colors::DETAIL_KEY)),
        Span::raw(value),
    ])
}

fn size_text(size: Option<u64>) -> String {
    size.map(format_bytes).unwrap_or_else(|| "-".to_string())
}

fn details(request: &NetworkFrame, session_start_ms: f64) -> Vec<Line<'static>> {
    vec![
        field("URL", request.description.clone()),
        field("Method", request.method().to_string()),
        field("Status", request.status()),
        field("Type", request.resource_type().to_string()),
        field("Start", format_offset(request.offset_ms(session_start_ms))),
        field("Duration", format_duration(request.duration_ms())),
        field("Request", size_text(request.request_size())),
        field("Response", size_text(request.response_size())),
    ]
}

fn setup_hint() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Headers and bodies were not captured for this replay.",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "Enable network detail capture in the recording SDK to see them here.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn payload(body: Option<&NetworkBody>) -> Vec<Line<'static>> {
    let Some(body) = body else {
        return vec![Line::from(Span::styled(
            "Nothing captured",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = vec![Line::from(Span::styled(
        "Headers",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if body.headers.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (name, value) in &body.headers {
        lines.push(Line::from(vec![
            Span::styled(format!("  {name}: "), Style::default().fg(colors::DETAIL_KEY)),
            Span::raw(value.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Body",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    match &body.body {
        Some(value) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            lines.extend(pretty.lines().map(|l| Line::from(format!("  {l}"))));
        }
        None => lines.push(Line::from(Span::styled(
            "  empty",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, request: &NetworkFrame) {
    if area.is_empty() {
        return;
    }
    let tab = app.table.drawer.tab;
    let titles: Vec<&str> = DetailTab::ALL.iter().map(|t| t.title()).collect();
    let selected = DetailTab::ALL.iter().position(|t| *t == tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(colors::TAB_INACTIVE))
        .highlight_style(
            Style::default()
                .fg(colors::TAB_ACTIVE)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, Rect::new(area.x, area.y, area.width, 1));

    let lines = match tab {
        DetailTab::Details => details(request, app.context.session_start_ms),
        DetailTab::Request | DetailTab::Response if !app.context.network_details => setup_hint(),
        DetailTab::Request => payload(request.data.request.as_ref()),
        DetailTab::Response => payload(request.data.response.as_ref()),
    };
    let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at() {
        let area = Rect::new(10, 5, 60, 4);
        assert_eq!(tab_at(10, area), Some(DetailTab::Details));
        assert_eq!(tab_at(18, area), Some(DetailTab::Details));
        assert_eq!(tab_at(19, area), None);
        assert_eq!(tab_at(20, area), Some(DetailTab::Request));
        assert_eq!(tab_at(30, area), Some(DetailTab::Response));
        assert_eq!(tab_at(70, area), None);
    }

    #[test]
    fn test_payload_lists_headers_and_body() {
        let mut body = NetworkBody::default();
        body.headers.insert("content-type".into(), "application/json".into());
        body.body = Some(serde_json::json!({"ok": true}));
        let text: Vec<String> = payload(Some(&body))
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.contains(&"  content-type: application/json".to_string()));
        assert!(text.iter().any(|l| l.contains("\"ok\": true")));
    }
}
