//! Two-way split panels with a draggable divider.

use ratatui::layout::Rect;

/// Which dimension a split divides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Regions side by side; the divider is a vertical bar and offsets are widths.
    Horizontal,
    /// Regions stacked; the divider is a horizontal bar and offsets are heights.
    Vertical,
}

impl SplitAxis {
    /// Extent of `area` along this axis.
    pub fn extent(self, area: Rect) -> u16 {
        match self {
            Self::Horizontal => area.width,
            Self::Vertical => area.height,
        }
    }

    /// Origin of `area` along this axis.
    pub fn origin(self, area: Rect) -> u16 {
        match self {
            Self::Horizontal => area.x,
            Self::Vertical => area.y,
        }
    }
}

/// Divider bounds for one split, measured from the split origin.
///
/// Always satisfies `min <= default <= max <= usable`, where `usable` is the
/// available extent minus the divider. Inputs that break the invariant are
/// clamped instead of rejected: the first region keeps as much of its minimum
/// as fits and the later region absorbs the shortfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBounds {
    pub default: u16,
    pub min: u16,
    pub max: u16,
    pub usable: u16,
}

impl SplitBounds {
    pub fn new(available: u16, divider: u16, default: u16, min: u16, max: u16) -> Self {
        let usable = available.saturating_sub(divider);
        let min = min.min(usable);
        let max = max.clamp(min, usable);
        let default = default.clamp(min, max);
        Self {
            default,
            min,
            max,
            usable,
        }
    }

    /// Bounds whose default is `ratio` of the usable extent.
    pub fn with_ratio(available: u16, divider: u16, ratio: f32, min: u16, max: u16) -> Self {
        let usable = available.saturating_sub(divider);
        Self::new(available, divider, fraction(usable, ratio), min, max)
    }

    pub fn clamp(&self, offset: u16) -> u16 {
        offset.clamp(self.min, self.max)
    }
}

/// `ratio` of `extent`, rounded down.
pub fn fraction(extent: u16, ratio: f32) -> u16 {
    (f32::from(extent) * ratio.clamp(0.0, 1.0)).floor() as u16
}

/// The three rectangles a split produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRects {
    pub first: Rect,
    pub divider: Rect,
    pub second: Rect,
}

/// Cut `area` along `axis` with the divider placed `offset` units from the origin.
///
/// The offset is expected to come from [`SplitBounds::clamp`]; it is clamped
/// again to the area so no rectangle ever extends past it.
pub fn split_area(area: Rect, axis: SplitAxis, offset: u16, divider: u16) -> SplitRects {
    let extent = axis.extent(area);
    let first_len = offset.min(extent);
    let divider_len = divider.min(extent - first_len);
    let second_len = extent - first_len - divider_len;

    match axis {
        SplitAxis::Horizontal => SplitRects {
            first: Rect::new(area.x, area.y, first_len, area.height),
            divider: Rect::new(area.x + first_len, area.y, divider_len, area.height),
            second: Rect::new(
                area.x + first_len + divider_len,
                area.y,
                second_len,
                area.height,
            ),
        },
        SplitAxis::Vertical => SplitRects {
            first: Rect::new(area.x, area.y, area.width, first_len),
            divider: Rect::new(area.x, area.y + first_len, area.width, divider_len),
            second: Rect::new(
                area.x,
                area.y + first_len + divider_len,
                area.width,
                second_len,
            ),
        },
    }
}
