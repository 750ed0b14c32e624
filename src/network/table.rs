use crate::analytics::Analytics;
use crate::context::ViewContext;
use crate::location::Location;

use super::columns::{COLUMN_COUNT, ColumnWidths};
use super::drawer::ResizableDrawer;
use super::filter::{NetworkFilters, cycle_facet, facet_values};
use super::frame::NetworkFrame;
use super::grid::{GridMetrics, VirtualGrid};
use super::jump::{JumpButtons, jump_buttons};
use super::selection;
use super::sort::SortConfig;

/// Position of a row relative to the playback markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBands {
    pub before_current: bool,
    /// None while nothing is hovered
    pub before_hover: Option<bool>,
}

impl RowBands {
    pub fn classify(offset_ms: f64, current_ms: f64, hover_ms: Option<f64>) -> Self {
        Self {
            before_current: offset_ms <= current_ms,
            before_hover: hover_ms.map(|hover| offset_ms <= hover),
        }
    }
}

/// What the table area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableView {
    Loading,
    /// No rows; `filtered` tells whether clearing the filters would help
    Empty { filtered: bool },
    Rows,
}

/// Network request table: filtered and sorted rows over a virtual grid.
#[derive(Debug)]
pub struct NetworkTable {
    frames: Option<Vec<NetworkFrame>>,
    filters: NetworkFilters,
    sort: SortConfig,
    /// Indices into `frames`, filtered then sorted
    rows: Vec<usize>,
    columns: ColumnWidths,
    pub grid: VirtualGrid,
    pub drawer: ResizableDrawer,
    cursor: usize,
}

impl NetworkTable {
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            frames: None,
            filters: NetworkFilters::new(),
            sort: SortConfig::default(),
            rows: Vec::new(),
            columns: ColumnWidths::new(),
            grid: VirtualGrid::new(metrics),
            drawer: ResizableDrawer::new(),
            cursor: 0,
        }
    }

    /// Replace the frames. `None` means they are still loading.
    pub fn set_frames(&mut self, frames: Option<Vec<NetworkFrame>>) {
        self.frames = frames;
        self.recompute();
    }

    pub fn frames(&self) -> Option<&[NetworkFrame]> {
        self.frames.as_deref()
    }

    pub fn filters(&self) -> &NetworkFilters {
        &self.filters
    }

    pub fn set_search(&mut self, term: &str) {
        if self.filters.search() == term {
            return;
        }
        self.filters.set_search(term);
        self.recompute();
    }

    /// Step the resource type filter to the next type present in the frames.
    pub fn cycle_type_filter(&mut self) {
        let values = facet_values(self.frames().unwrap_or_default(), |f| {
            f.resource_type().to_string()
        });
        let next = cycle_facet(self.filters.types(), &values);
        self.filters.set_types(next);
        self.recompute();
    }

    /// Step the status filter to the next status present in the frames.
    pub fn cycle_status_filter(&mut self) {
        let values = facet_values(self.frames().unwrap_or_default(), NetworkFrame::status);
        let next = cycle_facet(self.filters.statuses(), &values);
        self.filters.set_statuses(next);
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.recompute();
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        if self.sort == sort {
            return;
        }
        self.sort = sort;
        self.recompute();
    }

    /// Rebuild the row list from scratch, before anything renders it.
    fn recompute(&mut self) {
        let Some(frames) = self.frames.as_deref() else {
            self.rows.clear();
            self.columns.invalidate();
            return;
        };
        let mut rows = self.filters.apply(frames);
        self.sort.apply(frames, &mut rows);
        tracing::debug!(
            total = frames.len(),
            shown = rows.len(),
            sort = ?self.sort,
            "recomputed network rows"
        );
        self.rows = rows;
        self.columns.invalidate();
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.grid.clamp_scroll(self.rows.len());
    }

    pub fn view(&self) -> TableView {
        match &self.frames {
            None => TableView::Loading,
            Some(_) if self.rows.is_empty() => TableView::Empty {
                filtered: !self.filters.is_empty(),
            },
            Some(_) => TableView::Rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows the grid renders, header included.
    pub fn grid_row_count(&self) -> usize {
        self.grid.row_count(self.rows.len())
    }

    pub fn row(&self, index: usize) -> Option<&NetworkFrame> {
        let frames = self.frames.as_deref()?;
        self.rows.get(index).and_then(|&i| frames.get(i))
    }

    /// Session offsets of the rows, in display order.
    pub fn offsets(&self, session_start_ms: f64) -> Vec<f64> {
        (0..self.rows.len())
            .filter_map(|i| self.row(i))
            .map(|frame| frame.offset_ms(session_start_ms))
            .collect()
    }

    pub fn bands(
        &self,
        index: usize,
        session_start_ms: f64,
        current_ms: f64,
        hover_ms: Option<f64>,
    ) -> Option<RowBands> {
        self.row(index)
            .map(|frame| RowBands::classify(frame.offset_ms(session_start_ms), current_ms, hover_ms))
    }

    /// Column widths, with the dynamic column measured over the rows the grid
    /// materializes around the viewport.
    pub fn column_widths(&self, available: u16) -> [u16; COLUMN_COUNT] {
        let frames = self.frames.as_deref().unwrap_or_default();
        let materialized = self.grid.rendered_range(self.rows.len());
        let rows = self.rows[materialized].iter().filter_map(|&i| frames.get(i));
        self.columns.widths(rows, available)
    }

    pub fn jump_buttons(&self, session_start_ms: f64, current_ms: f64) -> JumpButtons {
        jump_buttons(
            &self.sort,
            &self.offsets(session_start_ms),
            current_ms,
            self.grid.visible_range(self.rows.len()),
        )
    }

    /// Scroll the row of the current playback time into view.
    pub fn jump_to_current(&mut self, session_start_ms: f64, current_ms: f64) -> bool {
        let buttons = self.jump_buttons(session_start_ms, current_ms);
        match buttons.target {
            Some(target) if buttons.up || buttons.down => {
                self.grid.scroll_to_row(target, self.rows.len());
                true
            }
            _ => false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.rows.len() - 1);
        self.grid.scroll_to_row(self.cursor, self.rows.len());
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.rows.len() {
            self.cursor = index;
        }
    }

    /// Selected row, when it names a row that exists.
    pub fn selected(&self, location: &Location) -> Option<usize> {
        selection::selected_row(location).filter(|&i| i < self.rows.len())
    }

    pub fn is_drawer_open(&self, location: &Location) -> bool {
        self.selected(location).is_some()
    }

    pub fn toggle_row(
        &mut self,
        index: usize,
        location: &mut Location,
        context: &ViewContext,
        analytics: &dyn Analytics,
    ) {
        let Some(frame) = self.row(index).cloned() else {
            return;
        };
        self.cursor = index;
        let current = self.selected(location);
        selection::toggle(location, current, index, &frame, context, analytics);
    }

    pub fn close_detail(
        &mut self,
        location: &mut Location,
        context: &ViewContext,
        analytics: &dyn Analytics,
    ) -> bool {
        let current = self.selected(location);
        selection::close(location, current, context, analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingAnalytics;
    use crate::network::columns::Column;
    use crate::network::frame::mock_frames;
    use crate::network::sort::SortDirection;

    fn table_with(count: usize) -> NetworkTable {
        let mut table = NetworkTable::new(GridMetrics::CELLS);
        table.grid.set_viewport_height(11);
        table.set_frames(Some(mock_frames(0.0, count)));
        table
    }

    #[test]
    fn test_loading_and_empty_views() {
        let mut table = NetworkTable::new(GridMetrics::CELLS);
        assert_eq!(table.view(), TableView::Loading);

        table.set_frames(Some(Vec::new()));
        assert_eq!(table.view(), TableView::Empty { filtered: false });

        table.set_frames(Some(mock_frames(0.0, 5)));
        table.set_search("no-such-request");
        assert_eq!(table.view(), TableView::Empty { filtered: true });

        table.clear_filters();
        assert_eq!(table.view(), TableView::Rows);
    }

    #[test]
    fn test_500_rows_ten_matches_sorted_by_duration() {
        let mut frames = mock_frames(0.0, 500);
        for frame in frames.iter_mut().step_by(50) {
            frame.description = format!("https://acme.example.com/needle{}", frame.start_timestamp);
        }
        let mut table = NetworkTable::new(GridMetrics::CELLS);
        table.set_frames(Some(frames));
        table.set_search("needle");
        table.set_sort(SortConfig {
            by: Column::Duration,
            direction: SortDirection::Descending,
        });

        assert_eq!(table.row_count(), 10);
        assert_eq!(table.grid_row_count(), 11);

        let location = Location::for_replay("r").unwrap();
        assert!(!table.is_drawer_open(&location));

        let mut location = location;
        let analytics = RecordingAnalytics::default();
        table.toggle_row(0, &mut location, &ViewContext::default(), &analytics);
        assert!(table.is_drawer_open(&location));
    }

    #[test]
    fn test_filter_then_clear_restores_count() {
        let mut table = table_with(200);
        table.set_search("logo");
        assert!(table.row_count() < 200);
        table.set_search("");
        assert_eq!(table.row_count(), 200);

        table.cycle_type_filter();
        assert!(table.row_count() < 200);
        table.clear_filters();
        assert_eq!(table.row_count(), 200);
    }

    #[test]
    fn test_filter_does_not_mutate_frames() {
        let mut table = table_with(30);
        let before = table.frames().unwrap().to_vec();
        table.set_search("api");
        table.set_sort(SortConfig::default().toggled(Column::Size));
        assert_eq!(table.frames().unwrap(), before.as_slice());
    }

    #[test]
    fn test_recompute_invalidates_column_cache() {
        let mut table = table_with(30);
        table.column_widths(200);
        assert!(table.columns.is_cached());
        table.set_search("css");
        assert!(!table.columns.is_cached());
    }

    #[test]
    fn test_path_width_measured_over_materialized_rows() {
        let mut frames = mock_frames(0.0, 40);
        frames[39].description = format!("https://acme.example.com/{}", "x".repeat(60));
        let mut table = NetworkTable::new(GridMetrics::CELLS);
        table.grid.set_viewport_height(11);
        table.set_frames(Some(frames));

        // Row 39 is far outside the first window plus overscan.
        let narrow = table.column_widths(300)[Column::Path.index()];
        assert!(narrow < 60);

        table.grid.scroll_to_row(39, table.row_count());
        table.set_search("acme");
        let wide = table.column_widths(300)[Column::Path.index()];
        assert!(wide > 60);
    }

    #[test]
    fn test_bands_do_not_reorder() {
        let table = table_with(10);
        let rows_before = table.rows.clone();
        let start = table.row(0).unwrap().start_timestamp;
        let third = table.row(3).unwrap().offset_ms(start);

        let bands = table.bands(2, start, third, Some(0.0)).unwrap();
        assert!(bands.before_current);
        assert_eq!(bands.before_hover, Some(false));

        let bands = table.bands(5, start, third, None).unwrap();
        assert!(!bands.before_current);
        assert_eq!(bands.before_hover, None);
        assert_eq!(table.rows, rows_before);
    }

    #[test]
    fn test_jump_to_current() {
        let mut table = table_with(100);
        let buttons = table.jump_buttons(0.0, 1e9);
        assert_eq!(buttons.target, Some(99));
        assert!(buttons.down);
        assert!(!buttons.up);

        assert!(table.jump_to_current(0.0, 1e9));
        assert_eq!(table.grid.visible_range(100), 90..100);

        let buttons = table.jump_buttons(0.0, 0.0);
        assert!(buttons.up);
        assert!(table.jump_to_current(0.0, 0.0));
        assert_eq!(table.grid.visible_range(100), 0..10);
        assert!(!table.jump_to_current(0.0, 0.0));
    }

    #[test]
    fn test_no_jump_when_not_sorted_by_time() {
        let mut table = table_with(100);
        table.set_sort(SortConfig::default().toggled(Column::Status));
        assert_eq!(table.jump_buttons(0.0, 1e9), JumpButtons::default());
    }

    #[test]
    fn test_selection_out_of_range_is_ignored() {
        let mut table = table_with(10);
        let mut location = Location::for_replay("r").unwrap();
        let analytics = RecordingAnalytics::default();
        table.toggle_row(8, &mut location, &ViewContext::default(), &analytics);
        assert_eq!(table.selected(&location), Some(8));

        table.set_search("logo");
        assert_eq!(table.selected(&location), None);
        assert!(!table.is_drawer_open(&location));
    }

    #[test]
    fn test_filtered_out_selection_reopens_without_close_event() {
        let mut table = table_with(10);
        let mut location = Location::for_replay("r").unwrap();
        let context = ViewContext::default();
        let analytics = RecordingAnalytics::default();
        table.toggle_row(8, &mut location, &context, &analytics);
        table.set_search("logo");
        analytics.clear();

        table.toggle_row(0, &mut location, &context, &analytics);
        assert_eq!(table.selected(&location), Some(0));
        assert_eq!(analytics.names(), vec!["replay.details-network-panel-opened"]);

        analytics.clear();
        table.set_search("no-such-request");
        assert!(!table.close_detail(&mut location, &context, &analytics));
        assert!(analytics.names().is_empty());
    }

    #[test]
    fn test_cursor_moves_within_rows() {
        let mut table = table_with(20);
        table.move_cursor(-3);
        assert_eq!(table.cursor(), 0);
        table.move_cursor(15);
        assert_eq!(table.cursor(), 15);
        assert!(table.grid.visible_range(20).contains(&15));
        table.move_cursor(100);
        assert_eq!(table.cursor(), 19);
    }
}
