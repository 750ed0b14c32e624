use std::time::Duration;

// Event loop timing
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const EVENT_RECV_TIMEOUT: Duration = Duration::from_millis(100);
pub const PLAYBACK_TICK_INTERVAL: Duration = Duration::from_millis(100);

// Screen chrome
pub const TIMELINE_HEIGHT: u16 = 3;
pub const HELP_BAR_HEIGHT: u16 = 1;

// Mouse interaction
pub const DIVIDER_HIT_ZONE: u16 = 1;
pub const WHEEL_SCROLL_ROWS: usize = 3;

// Playback
pub const SEEK_STEP_MS: f64 = 5_000.0;
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

// Network grid
pub const GRID_OVERSCAN_ROWS: usize = 5;

// Detail drawer
pub const DRAWER_HANDLE_ALLOWANCE: u16 = 4;
pub const DRAWER_MIN_HEIGHT: u16 = 3;

// Query parameter naming the selected network row
pub const DETAIL_ROW_PARAM: &str = "n_detail_row";

// Dialog sizing (percentages)
pub const LOADING_DIALOG_WIDTH: u16 = 60;
pub const LOADING_DIALOG_HEIGHT: u16 = 30;
pub const ERROR_DIALOG_WIDTH: u16 = 70;
pub const ERROR_DIALOG_HEIGHT: u16 = 40;
