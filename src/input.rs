use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, AppState};
use crate::constants::{DIVIDER_HIT_ZONE, SEEK_STEP_MS, WHEEL_SCROLL_ROWS};
use crate::network::{Column, column_at};
use crate::ui::drawer;
use crate::ui::geometry::{contains, timeline_time_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKey {
    None,
    G, // Waiting for second 'g' for gg
}

pub struct InputHandler {
    pending: PendingKey,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pending: PendingKey::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, app: &mut App) {
        // Handle Ctrl+C for quit (requires confirmation)
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            if app.quit_pending {
                app.quit();
            } else {
                app.quit_pending = true;
            }
            return;
        }

        // Any other key clears quit pending
        app.quit_pending = false;

        match app.state {
            AppState::Loading { .. } => {}
            AppState::Error { .. } => match key.code {
                KeyCode::Char('r') => app.retry_requested = true,
                KeyCode::Char('q') => app.quit(),
                _ => {}
            },
            AppState::Ready if app.filter.active => self.handle_filter_input(key, app),
            AppState::Ready => self.handle_normal_mode(key, app),
        }
    }

    fn handle_filter_input(&mut self, key: KeyEvent, app: &mut App) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.filter.active = false;
            }
            _ => {
                if app.filter.input(key) {
                    app.apply_filter_text();
                }
            }
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent, app: &mut App) {
        if self.pending == PendingKey::G {
            self.pending = PendingKey::None;
            if key.code == KeyCode::Char('g') {
                app.table.set_cursor(0);
                app.table.grid.scroll_to_top();
            }
            return;
        }

        let page = app.table.grid.viewport_rows().max(1) as isize;

        match key.code {
            KeyCode::Char('q') => app.quit(),

            // Filtering
            KeyCode::Char('/') => app.filter.active = true,
            KeyCode::Char('c') => app.clear_filters(),
            KeyCode::Char('t') => app.table.cycle_type_filter(),
            KeyCode::Char('T') => app.table.cycle_status_filter(),

            // Half-page (Ctrl+d/u) must come before the plain jump keys
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.table.move_cursor(page / 2);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.table.move_cursor(-(page / 2));
            }

            // Row cursor
            KeyCode::Char('j') | KeyCode::Down => app.table.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => app.table.move_cursor(-1),
            KeyCode::PageDown => app.table.move_cursor(page),
            KeyCode::PageUp => app.table.move_cursor(-page),
            KeyCode::Char('g') => self.pending = PendingKey::G,
            KeyCode::Char('G') | KeyCode::End => app.table.move_cursor(isize::MAX),
            KeyCode::Home => app.table.move_cursor(isize::MIN),

            // Details
            KeyCode::Enter => app.toggle_cursor_row(),
            KeyCode::Esc => {
                app.close_detail();
            }
            KeyCode::Char(']') => app.table.drawer.tab = app.table.drawer.tab.next(),
            KeyCode::Char('[') => app.table.drawer.tab = app.table.drawer.tab.prev(),

            // Sorting
            KeyCode::Char('s') => app.cycle_sort_column(),
            KeyCode::Char('S') => app.flip_sort_direction(),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                if let Some(column) = Column::from_index(index) {
                    app.sort_by(column);
                }
            }

            // Playback
            KeyCode::Char(' ') => app.toggle_play(),
            KeyCode::Left => app.clock.seek_by(-SEEK_STEP_MS),
            KeyCode::Right => app.clock.seek_by(SEEK_STEP_MS),
            KeyCode::Char('u') | KeyCode::Char('d') => {
                app.jump_to_current();
            }

            // Layout
            KeyCode::Char('L') => app.cycle_layout(),
            KeyCode::Char('f') => app.toggle_fullscreen(),

            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, app: &mut App, area: Rect) {
        if app.state != AppState::Ready {
            return;
        }
        let (screen, arrangement) = app.arrangement(area);
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if app.layout.start_drag(&arrangement, col, row, DIVIDER_HIT_ZONE) {
                    return;
                }

                if let Some(ms) = timeline_time_at(screen.timeline, col, app.clock.duration_ms())
                    && row == screen.timeline.y + 1
                {
                    app.clock.seek(ms);
                    return;
                }

                let Some(focus) = arrangement.focus else {
                    return;
                };
                if !contains(focus, col, row) {
                    app.filter.active = false;
                    return;
                }
                let geometry = app.focus_geometry(focus);

                if contains(geometry.filter, col, row) {
                    app.filter.active = true;
                    return;
                }
                app.filter.active = false;

                if let Some(handle) = geometry.handle
                    && contains(handle, col, row)
                {
                    app.table.drawer.start_drag();
                    return;
                }

                if let Some(drawer_area) = geometry.drawer
                    && row == drawer_area.y
                {
                    if let Some(tab) = drawer::tab_at(col, drawer_area) {
                        app.table.drawer.tab = tab;
                    }
                    return;
                }

                if !contains(geometry.grid, col, row) {
                    return;
                }

                let jumps = app
                    .table
                    .jump_buttons(app.context.session_start_ms, app.clock.current_ms());
                if (jumps.up && contains(geometry.jump_up, col, row))
                    || (jumps.down && contains(geometry.jump_down, col, row))
                {
                    app.jump_to_current();
                    return;
                }

                let widths = app.table.column_widths(geometry.grid.width);
                let column = column_at(&widths, col - geometry.grid.x);
                let y = row - geometry.grid.y;
                if y < app.table.grid.metrics().header_height {
                    if let Some(column) = column {
                        app.sort_by(column);
                    }
                    return;
                }

                if let Some(index) = app.table.grid.row_at(y, app.table.row_count()) {
                    if column == Some(Column::Timestamp) {
                        app.table.set_cursor(index);
                        app.seek_to_row(index);
                    } else {
                        app.toggle_row(index);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if app.layout.dragging().is_some() {
                    app.layout.drag_to(&arrangement, col, row);
                } else if app.table.drawer.is_dragging()
                    && let Some(focus) = arrangement.focus
                {
                    let body = app.focus_geometry(focus).body;
                    app.table.drawer.drag_to(row, body.y, body.height);
                }
            }
            MouseEventKind::Up(_) => {
                app.layout.stop_drag();
                app.table.drawer.stop_drag();
            }
            MouseEventKind::Moved => {
                let hover = if row == screen.timeline.y + 1 {
                    timeline_time_at(screen.timeline, col, app.clock.duration_ms())
                } else {
                    None
                };
                if hover.is_some() {
                    app.clock.set_hover(hover);
                    return;
                }

                let hovered_row = arrangement.focus.and_then(|focus| {
                    let grid = app.focus_geometry(focus).grid;
                    if !contains(grid, col, row) {
                        return None;
                    }
                    app.table.grid.row_at(row - grid.y, app.table.row_count())
                });
                app.hover_row(hovered_row);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let over_grid = arrangement
                    .focus
                    .is_some_and(|focus| contains(app.focus_geometry(focus).grid, col, row));
                if over_grid {
                    let delta = WHEEL_SCROLL_ROWS as isize;
                    let delta = if mouse.kind == MouseEventKind::ScrollUp {
                        -delta
                    } else {
                        delta
                    };
                    app.table.grid.scroll_by(delta, app.table.row_count());
                } else if contains(screen.timeline, col, row) {
                    let step = if mouse.kind == MouseEventKind::ScrollUp {
                        -SEEK_STEP_MS
                    } else {
                        SEEK_STEP_MS
                    };
                    app.clock.seek_by(step);
                }
            }
            _ => {}
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
