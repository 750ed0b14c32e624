use ratatui::style::Color;

// Borders
pub const BORDER_INACTIVE: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Green;

// Dividers
pub const DIVIDER_IDLE: Color = Color::DarkGray;
pub const DIVIDER_DRAGGING: Color = Color::Yellow;

// Timeline
pub const TIMELINE_PLAYED: Color = Color::Rgb(108, 95, 199);
pub const TIMELINE_REMAINING: Color = Color::Rgb(60, 60, 60);
pub const TIMELINE_HOVER: Color = Color::Rgb(232, 162, 72);

// Network rows
pub const ROW_BEFORE_CURRENT: Color = Color::White;
pub const ROW_AFTER_CURRENT: Color = Color::DarkGray;
pub const ROW_BEFORE_HOVER: Color = Color::Rgb(232, 162, 72);
pub const ROW_CURSOR_BG: Color = Color::Rgb(50, 50, 50);
pub const ROW_SELECTED_BG: Color = Color::Rgb(60, 52, 110);
pub const ROW_ERROR_STATUS: Color = Color::Red;
pub const HEADER_FG: Color = Color::Cyan;
pub const SORT_INDICATOR: Color = Color::Yellow;

// Jump buttons
pub const JUMP_BUTTON_FG: Color = Color::Black;
pub const JUMP_BUTTON_BG: Color = Color::Rgb(108, 95, 199);

// Filter input
pub const FILTER_PLACEHOLDER: Color = Color::DarkGray;
pub const FILTER_ACTIVE: Color = Color::White;

// Detail drawer
pub const DRAWER_HANDLE: Color = Color::DarkGray;
pub const TAB_ACTIVE: Color = Color::Yellow;
pub const TAB_INACTIVE: Color = Color::DarkGray;
pub const DETAIL_KEY: Color = Color::Cyan;
