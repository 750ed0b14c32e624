//! Virtualized grid geometry: which rows are visible and which get rendered.

use std::cell::Cell;
use std::ops::Range;

use crate::constants::GRID_OVERSCAN_ROWS;

/// Row heights for one unit scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub header_height: u16,
    pub row_height: u16,
    pub overscan: usize,
}

impl GridMetrics {
    /// Header 25px, rows 28px.
    #[cfg(test)]
    pub const PIXELS: Self = Self {
        header_height: 25,
        row_height: 28,
        overscan: GRID_OVERSCAN_ROWS,
    };

    pub const CELLS: Self = Self {
        header_height: 1,
        row_height: 1,
        overscan: GRID_OVERSCAN_ROWS,
    };
}

/// Scroll state of a grid with one fixed header row.
///
/// `scroll` is the index of the first visible data row. Both it and the
/// viewport are `Cell`s because the viewport height is only known at render
/// time, where the scroll position also gets clamped.
#[derive(Debug)]
pub struct VirtualGrid {
    metrics: GridMetrics,
    scroll: Cell<usize>,
    viewport_rows: Cell<usize>,
}

impl VirtualGrid {
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            metrics,
            scroll: Cell::new(0),
            viewport_rows: Cell::new(0),
        }
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Rows the grid renders, counting the header.
    pub fn row_count(&self, data_rows: usize) -> usize {
        data_rows + 1
    }

    /// Record the grid's height (header included) in grid units.
    pub fn set_viewport_height(&self, height: u16) {
        let body = height.saturating_sub(self.metrics.header_height);
        let rows = if self.metrics.row_height == 0 {
            0
        } else {
            usize::from(body / self.metrics.row_height)
        };
        self.viewport_rows.set(rows);
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows.get()
    }

    pub fn scroll(&self) -> usize {
        self.scroll.get()
    }

    fn max_scroll(&self, data_rows: usize) -> usize {
        data_rows.saturating_sub(self.viewport_rows.get())
    }

    /// Clamp the scroll position to `data_rows`, persist and return it.
    pub fn clamp_scroll(&self, data_rows: usize) -> usize {
        let clamped = self.scroll.get().min(self.max_scroll(data_rows));
        self.scroll.set(clamped);
        clamped
    }

    pub fn scroll_by(&self, delta: isize, data_rows: usize) {
        let next = self.scroll.get().saturating_add_signed(delta);
        self.scroll.set(next.min(self.max_scroll(data_rows)));
    }

    pub fn scroll_to_top(&self) {
        self.scroll.set(0);
    }

    /// Scroll the minimum amount that brings `row` into view.
    pub fn scroll_to_row(&self, row: usize, data_rows: usize) {
        if data_rows == 0 {
            self.scroll.set(0);
            return;
        }
        let row = row.min(data_rows - 1);
        let viewport = self.viewport_rows.get().max(1);
        let first = self.scroll.get();
        if row < first {
            self.scroll.set(row);
        } else if row >= first + viewport {
            self.scroll.set(row + 1 - viewport);
        }
        self.clamp_scroll(data_rows);
    }

    /// Data rows fully inside the viewport.
    pub fn visible_range(&self, data_rows: usize) -> Range<usize> {
        let first = self.clamp_scroll(data_rows);
        let last = (first + self.viewport_rows.get()).min(data_rows);
        first..last
    }

    /// Data rows to materialize: the visible rows plus the overscan margin.
    pub fn rendered_range(&self, data_rows: usize) -> Range<usize> {
        let visible = self.visible_range(data_rows);
        let start = visible.start.saturating_sub(self.metrics.overscan);
        let end = (visible.end + self.metrics.overscan).min(data_rows);
        start..end
    }

    /// Data row under a grid-relative vertical position, if any.
    pub fn row_at(&self, y: u16, data_rows: usize) -> Option<usize> {
        let body_y = y.checked_sub(self.metrics.header_height)?;
        if self.metrics.row_height == 0 {
            return None;
        }
        let row = self.scroll.get() + usize::from(body_y / self.metrics.row_height);
        (row < data_rows && row < self.scroll.get() + self.viewport_rows.get()).then_some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(height: u16) -> VirtualGrid {
        let grid = VirtualGrid::new(GridMetrics::CELLS);
        grid.set_viewport_height(height);
        grid
    }

    #[test]
    fn test_pixel_viewport() {
        let grid = VirtualGrid::new(GridMetrics::PIXELS);
        grid.set_viewport_height(25 + 28 * 10 + 5);
        assert_eq!(grid.viewport_rows(), 10);
    }

    #[test]
    fn test_row_count_includes_header() {
        assert_eq!(grid(10).row_count(10), 11);
        assert_eq!(grid(10).row_count(0), 1);
    }

    #[test]
    fn test_visible_and_rendered_ranges() {
        let grid = grid(11);
        assert_eq!(grid.visible_range(500), 0..10);
        assert_eq!(grid.rendered_range(500), 0..15);

        grid.scroll_by(100, 500);
        assert_eq!(grid.visible_range(500), 100..110);
        assert_eq!(grid.rendered_range(500), 95..115);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let grid = grid(11);
        grid.scroll_by(1000, 50);
        assert_eq!(grid.scroll(), 40);
        grid.scroll_by(-1000, 50);
        assert_eq!(grid.scroll(), 0);

        grid.scroll_by(40, 50);
        assert_eq!(grid.visible_range(20), 10..20);
    }

    #[test]
    fn test_scroll_to_row() {
        let grid = grid(11);
        grid.scroll_to_row(25, 100);
        assert_eq!(grid.visible_range(100), 16..26);

        grid.scroll_to_row(20, 100);
        assert_eq!(grid.scroll(), 16);

        grid.scroll_to_row(3, 100);
        assert_eq!(grid.visible_range(100), 3..13);
    }

    #[test]
    fn test_row_at() {
        let grid = grid(11);
        grid.scroll_by(5, 100);
        assert_eq!(grid.row_at(0, 100), None);
        assert_eq!(grid.row_at(1, 100), Some(5));
        assert_eq!(grid.row_at(10, 100), Some(14));
        assert_eq!(grid.row_at(11, 100), None);
        assert_eq!(grid.row_at(1, 3), None);
    }
}
