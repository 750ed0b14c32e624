use std::cell::Cell;

use ratatui::text::Span;

use super::frame::{NetworkFrame, format_bytes, format_duration, format_offset};

/// Columns of the request table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Method,
    Status,
    Path,
    Type,
    Size,
    Duration,
    Timestamp,
}

pub const COLUMN_COUNT: usize = 7;

/// Column whose width follows its content.
pub const DYNAMIC_COLUMN: Column = Column::Path;

const MIN_DYNAMIC_WIDTH: u16 = 8;

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::Method,
        Self::Status,
        Self::Path,
        Self::Type,
        Self::Size,
        Self::Duration,
        Self::Timestamp,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Method => "Method",
            Self::Status => "Status",
            Self::Path => "Path",
            Self::Type => "Type",
            Self::Size => "Size",
            Self::Duration => "Duration",
            Self::Timestamp => "Timestamp",
        }
    }

    /// Width of the fixed columns, including one cell of padding.
    fn fixed_width(self) -> u16 {
        match self {
            Self::Method => 7,
            Self::Status => 7,
            Self::Path => 0,
            Self::Type => 8,
            Self::Size => 10,
            Self::Duration => 10,
            Self::Timestamp => 11,
        }
    }

    /// Cell text for `frame`.
    pub fn cell(self, frame: &NetworkFrame, session_start_ms: f64) -> String {
        match self {
            Self::Method => frame.method().to_string(),
            Self::Status => frame.status(),
            Self::Path => frame.path().to_string(),
            Self::Type => frame.resource_type().to_string(),
            Self::Size => frame
                .response_size()
                .map(format_bytes)
                .unwrap_or_else(|| "-".to_string()),
            Self::Duration => format_duration(frame.duration_ms()),
            Self::Timestamp => format_offset(frame.offset_ms(session_start_ms)),
        }
    }
}

/// Column widths with the dynamic column measured against its cells.
///
/// The measurement walks the materialized rows (visible plus overscan) and is
/// cached until the rows change. Uses `Cell` because the measurement happens
/// at render time.
#[derive(Debug, Default)]
pub struct ColumnWidths {
    measured: Cell<Option<u16>>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached measurement (rows or filters changed).
    pub fn invalidate(&self) {
        self.measured.set(None);
    }

    #[cfg(test)]
    pub fn is_cached(&self) -> bool {
        self.measured.get().is_some()
    }

    fn measure<'a>(&self, frames: impl Iterator<Item = &'a NetworkFrame>) -> u16 {
        if let Some(width) = self.measured.get() {
            return width;
        }
        let content = frames
            .map(|frame| Span::raw(frame.path()).width())
            .max()
            .unwrap_or(0)
            .max(DYNAMIC_COLUMN.title().len());
        let width = u16::try_from(content).unwrap_or(u16::MAX).saturating_add(1);
        self.measured.set(Some(width));
        width
    }

    /// Widths for all columns within `available` cells. The dynamic column
    /// gets its measured width, shrunk to what the fixed columns leave over.
    pub fn widths<'a>(
        &self,
        frames: impl Iterator<Item = &'a NetworkFrame>,
        available: u16,
    ) -> [u16; COLUMN_COUNT] {
        let fixed: u16 = Column::ALL.iter().map(|c| c.fixed_width()).sum();
        let room = available.saturating_sub(fixed).max(MIN_DYNAMIC_WIDTH);
        let dynamic = self.measure(frames).min(room);

        let mut widths = [0; COLUMN_COUNT];
        for (slot, column) in widths.iter_mut().zip(Column::ALL) {
            *slot = if column == DYNAMIC_COLUMN {
                dynamic
            } else {
                column.fixed_width()
            };
        }
        widths
    }
}

/// Column under horizontal position `x` (relative to the table's left edge).
pub fn column_at(widths: &[u16; COLUMN_COUNT], x: u16) -> Option<Column> {
    let mut start = 0u16;
    for (column, width) in Column::ALL.iter().zip(widths) {
        let end = start.saturating_add(*width);
        if x >= start && x < end {
            return Some(*column);
        }
        start = end;
    }
    None
}
