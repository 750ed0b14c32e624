mod columns;
mod drawer;
mod filter;
mod frame;
mod grid;
mod jump;
mod selection;
mod sort;
mod table;

pub use columns::{COLUMN_COUNT, Column, column_at};
pub use drawer::DetailTab;
pub use frame::{NetworkBody, NetworkFrame, format_bytes, format_duration, format_offset, mock_frames};
pub use grid::GridMetrics;
pub use sort::{SortConfig, SortDirection};
pub use table::{NetworkTable, RowBands, TableView};
