use std::time::Instant;

use ratatui::layout::Rect;

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::context::ViewContext;
use crate::editor::FilterInput;
use crate::layout::{Arrangement, LayoutVariant, ReplayLayout, SizeConstraints};
use crate::location::Location;
use crate::measure::SizeObserver;
use crate::network::{Column, GridMetrics, NetworkTable, SortConfig};
use crate::playback::PlaybackClock;
use crate::settings::Settings;
use crate::source::Recording;
use crate::ui::geometry::{FocusGeometry, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Loading { status: String },
    Error { message: String },
    Ready,
}

pub struct App {
    pub state: AppState,
    pub context: ViewContext,
    pub location: Location,
    pub observer: SizeObserver,
    pub layout: ReplayLayout,
    pub table: NetworkTable,
    pub clock: PlaybackClock,
    pub filter: FilterInput<'static>,
    pub settings: Settings,
    /// Write layout changes back to the settings file
    pub persist_settings: bool,
    analytics: Box<dyn Analytics>,
    pub should_quit: bool,
    pub quit_pending: bool,
    pub retry_requested: bool,
}

impl App {
    pub fn new(
        settings: Settings,
        context: ViewContext,
        location: Location,
        analytics: Box<dyn Analytics>,
    ) -> Self {
        let observer = SizeObserver::new();
        let layout = ReplayLayout::mount(settings.layout, SizeConstraints::CELLS, &observer);
        let clock = PlaybackClock::new(0.0, settings.playback.speed);
        Self {
            state: AppState::Loading {
                status: "Loading recording...".to_string(),
            },
            context,
            location,
            observer,
            layout,
            table: NetworkTable::new(GridMetrics::CELLS),
            clock,
            filter: FilterInput::new(),
            settings,
            persist_settings: true,
            analytics,
            should_quit: false,
            quit_pending: false,
            retry_requested: false,
        }
    }

    pub fn set_loading_status(&mut self, status: String) {
        self.state = AppState::Loading { status };
        self.table.set_frames(None);
    }

    pub fn set_ready(&mut self, recording: Recording) {
        tracing::info!(
            frames = recording.frames.len(),
            duration_ms = recording.duration_ms,
            "recording loaded"
        );
        if let Some(replay_id) = recording.replay_id
            && replay_id != self.context.replay_id
        {
            match Location::for_replay(&replay_id) {
                Ok(location) => self.location = location,
                Err(e) => tracing::warn!(error = %e, "keeping previous location"),
            }
            self.context.replay_id = replay_id;
        }
        self.context.session_start_ms = recording.session_start_ms;
        self.clock.set_duration(recording.duration_ms);
        self.table.set_frames(Some(recording.frames));
        self.state = AppState::Ready;
    }

    pub fn set_error(&mut self, message: String) {
        tracing::error!(%message, "failed to load recording");
        self.state = AppState::Error { message };
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Report the container size for this frame and size the grid viewport.
    /// Runs before every draw so hit testing and rendering agree.
    pub fn sync(&mut self, area: Rect) {
        let screen = Screen::compute(area);
        if self.observer.observe(screen.container.as_size()) {
            tracing::debug!(
                width = screen.container.width,
                height = screen.container.height,
                "container measured"
            );
        }
        if let Some(focus) = self.layout.arrange(screen.container).focus {
            let geometry = self.focus_geometry(focus);
            self.table.grid.set_viewport_height(geometry.grid.height);
            self.table.grid.clamp_scroll(self.table.row_count());
        }
    }

    pub fn arrangement(&self, area: Rect) -> (Screen, Arrangement) {
        let screen = Screen::compute(area);
        let arrangement = self.layout.arrange(screen.container);
        (screen, arrangement)
    }

    pub fn focus_geometry(&self, focus: Rect) -> FocusGeometry {
        let open = self.table.is_drawer_open(&self.location);
        FocusGeometry::compute(focus, |body| open.then(|| self.table.drawer.height(body)))
    }

    // Layout

    pub fn set_layout(&mut self, variant: LayoutVariant) {
        if variant == self.layout.variant() {
            return;
        }
        self.layout.set_variant(variant);
        self.settings.layout = variant;
        if self.persist_settings
            && let Err(e) = self.settings.save()
        {
            tracing::warn!(error = %e, "could not persist layout choice");
        }
        self.analytics.track(AnalyticsEvent::LayoutChanged {
            organization: self.context.organization.clone(),
            layout: variant,
        });
    }

    pub fn cycle_layout(&mut self) {
        self.set_layout(self.layout.variant().next());
    }

    pub fn toggle_fullscreen(&mut self) {
        self.layout.toggle_fullscreen();
    }

    // Network table

    pub fn toggle_row(&mut self, index: usize) {
        self.table.toggle_row(
            index,
            &mut self.location,
            &self.context,
            self.analytics.as_ref(),
        );
    }

    pub fn toggle_cursor_row(&mut self) {
        self.toggle_row(self.table.cursor());
    }

    pub fn close_detail(&mut self) -> bool {
        self.table
            .close_detail(&mut self.location, &self.context, self.analytics.as_ref())
    }

    pub fn jump_to_current(&mut self) -> bool {
        self.table
            .jump_to_current(self.context.session_start_ms, self.clock.current_ms())
    }

    pub fn sort_by(&mut self, column: Column) {
        self.table.set_sort(self.table.sort().toggled(column));
    }

    /// Move the sort key to the next column, keeping the direction.
    pub fn cycle_sort_column(&mut self) {
        let sort = self.table.sort();
        let next = Column::from_index((sort.by.index() + 1) % Column::ALL.len()).unwrap_or(sort.by);
        self.table.set_sort(SortConfig { by: next, ..sort });
    }

    pub fn flip_sort_direction(&mut self) {
        let sort = self.table.sort();
        self.table.set_sort(SortConfig {
            direction: sort.direction.flip(),
            ..sort
        });
    }

    pub fn apply_filter_text(&mut self) {
        let text = self.filter.text();
        self.table.set_search(&text);
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.table.clear_filters();
    }

    // Playback

    pub fn tick(&mut self, now: Instant) {
        self.clock.tick(now);
    }

    pub fn toggle_play(&mut self) {
        self.clock.toggle_play(Instant::now());
    }

    /// Seek playback to the start of row `index`.
    pub fn seek_to_row(&mut self, index: usize) {
        if let Some(frame) = self.table.row(index) {
            let offset = frame.offset_ms(self.context.session_start_ms);
            self.clock.seek(offset);
        }
    }

    pub fn hover_row(&mut self, index: Option<usize>) {
        let hover = index
            .and_then(|i| self.table.row(i))
            .map(|frame| frame.offset_ms(self.context.session_start_ms));
        self.clock.set_hover(hover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingAnalytics;
    use crate::network::{SortDirection, mock_frames};
    use std::rc::Rc;

    struct SharedAnalytics(Rc<RecordingAnalytics>);

    impl Analytics for SharedAnalytics {
        fn track(&self, event: AnalyticsEvent) {
            self.0.track(event);
        }
    }

    fn ready_app() -> (App, Rc<RecordingAnalytics>) {
        let recorder = Rc::new(RecordingAnalytics::default());
        let mut app = App::new(
            Settings::default(),
            ViewContext::default(),
            Location::for_replay("abc").unwrap(),
            Box::new(SharedAnalytics(recorder.clone())),
        );
        app.persist_settings = false;
        app.set_ready(Recording::new(
            Some("abc".to_string()),
            mock_frames(1_000.0, 40),
            Some(1_000.0),
            None,
        ));
        app.sync(Rect::new(0, 0, 120, 40));
        (app, recorder)
    }

    #[test]
    fn test_loading_until_ready() {
        let app = App::new(
            Settings::default(),
            ViewContext::default(),
            Location::for_replay("abc").unwrap(),
            Box::new(RecordingAnalytics::default()),
        );
        assert!(matches!(app.state, AppState::Loading { .. }));
        assert_eq!(app.layout.variant(), LayoutVariant::Topbar);

        let (app, _) = ready_app();
        assert_eq!(app.state, AppState::Ready);
        assert_eq!(app.table.row_count(), 40);
        assert_eq!(app.context.session_start_ms, 1_000.0);
    }

    #[test]
    fn test_sync_measures_container() {
        let (app, _) = ready_app();
        let size = app.layout.measured_size().unwrap();
        assert_eq!((size.width, size.height), (120, 36));
        assert!(app.table.grid.viewport_rows() > 0);
    }

    #[test]
    fn test_row_toggle_updates_location() {
        let (mut app, recorder) = ready_app();
        app.toggle_row(3);
        assert_eq!(app.location.query("n_detail_row").as_deref(), Some("3"));
        assert_eq!(recorder.names(), vec!["replay.details-network-panel-opened"]);

        recorder.clear();
        app.toggle_row(3);
        assert_eq!(app.location.query("n_detail_row"), None);
        assert_eq!(recorder.names(), vec!["replay.details-network-panel-closed"]);
        assert!(!app.close_detail());
    }

    #[test]
    fn test_drawer_shrinks_grid() {
        let (mut app, _) = ready_app();
        let before = app.table.grid.viewport_rows();
        app.toggle_row(0);
        app.sync(Rect::new(0, 0, 120, 40));
        assert!(app.table.grid.viewport_rows() < before);
    }

    #[test]
    fn test_layout_cycle_tracks_change() {
        let (mut app, recorder) = ready_app();
        app.cycle_layout();
        assert_eq!(app.layout.variant(), LayoutVariant::SidebarLeft);
        assert_eq!(app.settings.layout, LayoutVariant::SidebarLeft);
        assert_eq!(
            recorder.events(),
            vec![AnalyticsEvent::LayoutChanged {
                organization: "default".to_string(),
                layout: LayoutVariant::SidebarLeft,
            }]
        );

        recorder.clear();
        app.set_layout(LayoutVariant::SidebarLeft);
        assert!(recorder.names().is_empty());
    }

    #[test]
    fn test_sort_controls() {
        let (mut app, _) = ready_app();
        app.sort_by(Column::Status);
        assert_eq!(app.table.sort().by, Column::Status);
        app.sort_by(Column::Status);
        assert_eq!(app.table.sort().direction, SortDirection::Descending);

        app.cycle_sort_column();
        assert_eq!(app.table.sort().by, Column::Path);
        assert_eq!(app.table.sort().direction, SortDirection::Descending);

        app.flip_sort_direction();
        assert_eq!(app.table.sort().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_filter_text_flows_to_table() {
        let (mut app, _) = ready_app();
        for c in "zzz-nothing".chars() {
            app.filter.input(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(c),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        app.apply_filter_text();
        assert_eq!(app.table.row_count(), 0);

        app.clear_filters();
        assert_eq!(app.table.row_count(), 40);
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_seek_and_hover_rows() {
        let (mut app, _) = ready_app();
        app.seek_to_row(5);
        let expected = app.table.row(5).unwrap().offset_ms(1_000.0);
        assert_eq!(app.clock.current_ms(), expected.min(app.clock.duration_ms()));

        app.hover_row(Some(2));
        assert!(app.clock.hover_ms().is_some());
        app.hover_row(None);
        assert_eq!(app.clock.hover_ms(), None);
    }
}
