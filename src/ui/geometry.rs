//! Screen geometry shared by rendering and mouse hit testing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::constants::{HELP_BAR_HEIGHT, TIMELINE_HEIGHT};

const JUMP_BUTTON_WIDTH: u16 = 14;

/// Top-level screen areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub timeline: Rect,
    /// The measured container the replay layout arranges
    pub container: Rect,
    pub help: Rect,
}

impl Screen {
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TIMELINE_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(HELP_BAR_HEIGHT),
            ])
            .split(area);
        Self {
            timeline: chunks[0],
            container: chunks[1],
            help: chunks[2],
        }
    }
}

/// Bar inside the timeline block, one row tall.
pub fn timeline_bar(timeline: Rect) -> Rect {
    Rect::new(
        timeline.x.saturating_add(1),
        timeline.y.saturating_add(1),
        timeline.width.saturating_sub(2),
        timeline.height.saturating_sub(2).min(1),
    )
}

/// Session time at `column` on the timeline bar, if the column is on it.
pub fn timeline_time_at(timeline: Rect, column: u16, duration_ms: f64) -> Option<f64> {
    let bar = timeline_bar(timeline);
    if bar.width == 0 || column < bar.x || column >= bar.x + bar.width {
        return None;
    }
    let ratio = f64::from(column - bar.x) / f64::from(bar.width.saturating_sub(1).max(1));
    Some(ratio.clamp(0.0, 1.0) * duration_ms)
}

/// Areas inside the network (focus) pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusGeometry {
    pub filter: Rect,
    /// Header row plus data rows
    pub grid: Rect,
    /// Body below the filter, shared by the grid and the drawer
    pub body: Rect,
    pub handle: Option<Rect>,
    pub drawer: Option<Rect>,
    pub jump_up: Rect,
    pub jump_down: Rect,
}

impl FocusGeometry {
    /// `drawer_height` is the drawer's height for this body, when it is open.
    pub fn compute(focus: Rect, drawer_height: impl Fn(u16) -> Option<u16>) -> Self {
        let inner = Rect::new(
            focus.x.saturating_add(1),
            focus.y.saturating_add(1),
            focus.width.saturating_sub(2),
            focus.height.saturating_sub(2),
        );
        let filter = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let body = Rect::new(
            inner.x,
            inner.y + filter.height,
            inner.width,
            inner.height - filter.height,
        );

        let (grid, handle, drawer) = match drawer_height(body.height) {
            Some(height) if body.height > height => {
                let grid_height = body.height - height - 1;
                let handle = Rect::new(body.x, body.y + grid_height, body.width, 1);
                let drawer = Rect::new(body.x, handle.y + 1, body.width, height);
                (
                    Rect::new(body.x, body.y, body.width, grid_height),
                    Some(handle),
                    Some(drawer),
                )
            }
            _ => (body, None, None),
        };

        let button_width = JUMP_BUTTON_WIDTH.min(grid.width);
        let button_x = grid.x + grid.width - button_width;
        let jump_up = Rect::new(button_x, grid.y + grid.height.min(1), button_width, grid.height.min(1));
        let jump_down = Rect::new(
            button_x,
            (grid.y + grid.height).saturating_sub(1),
            button_width,
            grid.height.min(1),
        );

        Self {
            filter,
            grid,
            body,
            handle,
            drawer,
            jump_up,
            jump_down,
        }
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
