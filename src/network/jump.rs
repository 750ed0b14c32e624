use std::ops::Range;

use super::sort::SortConfig;

/// Which "jump to current time" buttons to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpButtons {
    /// Row of the current playback time, when jumping is offered
    pub target: Option<usize>,
    pub up: bool,
    pub down: bool,
}

/// Index of the row for `current_ms`, given each row's session offset in
/// display order: the row with the smallest offset at or after the current
/// time. When every row is earlier, the latest row.
pub fn current_time_row(offsets: &[f64], current_ms: f64) -> Option<usize> {
    let at_or_after = offsets
        .iter()
        .enumerate()
        .filter(|(_, offset)| **offset >= current_ms)
        .min_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ia.cmp(ib)))
        .map(|(idx, _)| idx);

    at_or_after.or_else(|| {
        offsets
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ib.cmp(ia)))
            .map(|(idx, _)| idx)
    })
}

/// Buttons for the visible window. Only offered when rows are in time order.
pub fn jump_buttons(
    sort: &SortConfig,
    offsets: &[f64],
    current_ms: f64,
    visible: Range<usize>,
) -> JumpButtons {
    if !sort.is_by_timestamp() || visible.is_empty() {
        return JumpButtons::default();
    }
    let Some(target) = current_time_row(offsets, current_ms) else {
        return JumpButtons::default();
    };
    JumpButtons {
        target: Some(target),
        up: target < visible.start,
        down: target >= visible.end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::columns::Column;
    use crate::network::sort::SortDirection;

    const ASC: [f64; 6] = [0.0, 100.0, 200.0, 300.0, 400.0, 500.0];

    #[test]
    fn test_current_time_row() {
        assert_eq!(current_time_row(&ASC, 150.0), Some(2));
        assert_eq!(current_time_row(&ASC, 200.0), Some(2));
        assert_eq!(current_time_row(&ASC, -10.0), Some(0));
        assert_eq!(current_time_row(&ASC, 900.0), Some(5));
        assert_eq!(current_time_row(&[], 0.0), None);
    }

    #[test]
    fn test_current_time_row_descending() {
        let desc: Vec<f64> = ASC.iter().rev().copied().collect();
        assert_eq!(current_time_row(&desc, 150.0), Some(3));
        assert_eq!(current_time_row(&desc, 900.0), Some(0));
    }

    #[test]
    fn test_buttons_follow_visible_window() {
        let sort = SortConfig::default();

        let buttons = jump_buttons(&sort, &ASC, 450.0, 0..3);
        assert_eq!(buttons.target, Some(5));
        assert!(buttons.down);
        assert!(!buttons.up);

        let buttons = jump_buttons(&sort, &ASC, 50.0, 3..6);
        assert!(buttons.up);
        assert!(!buttons.down);

        let buttons = jump_buttons(&sort, &ASC, 250.0, 2..5);
        assert!(!buttons.up && !buttons.down);
    }

    #[test]
    fn test_buttons_descending() {
        let desc: Vec<f64> = ASC.iter().rev().copied().collect();
        let sort = SortConfig::default().toggled(Column::Timestamp);
        assert_eq!(sort.direction, SortDirection::Descending);

        let buttons = jump_buttons(&sort, &desc, 50.0, 0..3);
        assert_eq!(buttons.target, Some(4));
        assert!(buttons.down);
    }

    #[test]
    fn test_no_buttons_unless_sorted_by_time() {
        let sort = SortConfig::default().toggled(Column::Duration);
        assert_eq!(jump_buttons(&sort, &ASC, 450.0, 0..3), JumpButtons::default());
    }
}
