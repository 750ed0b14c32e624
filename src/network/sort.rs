use std::cmp::Ordering;

use super::columns::Column;
use super::frame::NetworkFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sort key and direction for the request table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub by: Column,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            by: Column::Timestamp,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortConfig {
    pub fn is_by_timestamp(&self) -> bool {
        self.by == Column::Timestamp
    }

    /// Clicking a header: the same column flips direction, another column
    /// starts ascending.
    pub fn toggled(self, by: Column) -> Self {
        if self.by == by {
            Self {
                by,
                direction: self.direction.flip(),
            }
        } else {
            Self {
                by,
                direction: SortDirection::Ascending,
            }
        }
    }

    /// Order two frames by the sort key alone, ignoring direction.
    fn compare_keys(&self, a: &NetworkFrame, b: &NetworkFrame) -> Ordering {
        match self.by {
            Column::Method => a.method().cmp(b.method()),
            Column::Status => a
                .data
                .status_code
                .unwrap_or(0)
                .cmp(&b.data.status_code.unwrap_or(0)),
            Column::Path => a.path().cmp(b.path()),
            Column::Type => a.op.cmp(&b.op),
            Column::Size => a.response_size().unwrap_or(0).cmp(&b.response_size().unwrap_or(0)),
            Column::Duration => a.duration_ms().total_cmp(&b.duration_ms()),
            Column::Timestamp => a.start_timestamp.total_cmp(&b.start_timestamp),
        }
    }

    /// Sort `rows` (indices into `frames`) in place.
    ///
    /// The sort is stable: rows with equal keys keep their relative order in
    /// both directions, since direction only reverses the key comparison.
    pub fn apply(&self, frames: &[NetworkFrame], rows: &mut [usize]) {
        rows.sort_by(|&a, &b| {
            let ordering = self.compare_keys(&frames[a], &frames[b]);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}
