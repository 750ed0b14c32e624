//! Replay layout: arranges the video, focus and sidebar regions with nested
//! two-way splits whose dividers can be dragged.

mod split;

use std::fmt;
use std::str::FromStr;

use ratatui::layout::{Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::measure::{MeasuredSize, SizeObserver};

pub use split::{SplitAxis, SplitBounds, SplitRects, split_area};

/// Named arrangement of the replay regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    VideoOnly,
    NoVideo,
    SidebarLeft,
    #[default]
    Topbar,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 4] = [
        Self::Topbar,
        Self::SidebarLeft,
        Self::NoVideo,
        Self::VideoOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VideoOnly => "video_only",
            Self::NoVideo => "no_video",
            Self::SidebarLeft => "sidebar_left",
            Self::Topbar => "topbar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VideoOnly => "Video only",
            Self::NoVideo => "No video",
            Self::SidebarLeft => "Sidebar left",
            Self::Topbar => "Top bar",
        }
    }

    /// Cycle Topbar -> SidebarLeft -> NoVideo -> VideoOnly -> Topbar
    pub fn next(self) -> Self {
        match self {
            Self::Topbar => Self::SidebarLeft,
            Self::SidebarLeft => Self::NoVideo,
            Self::NoVideo => Self::VideoOnly,
            Self::VideoOnly => Self::Topbar,
        }
    }

    pub fn has_video(self) -> bool {
        !matches!(self, Self::NoVideo)
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown layout '{0}' (expected topbar, sidebar_left, no_video or video_only)")]
pub struct ParseLayoutError(pub String);

impl FromStr for LayoutVariant {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLayoutError(s.to_string()))
    }
}

/// Minimum region sizes and divider thickness for one unit scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraints {
    pub video_width: u16,
    pub content_width: u16,
    pub sidebar_width: u16,
    pub video_height: u16,
    pub content_height: u16,
    pub sidebar_height: u16,
    pub divider: u16,
}

impl SizeConstraints {
    /// Browser pixel scale, used to check the layout math at its native units.
    #[cfg(test)]
    pub const PIXELS: Self = Self {
        video_width: 325,
        content_width: 340,
        sidebar_width: 325,
        video_height: 200,
        content_height: 180,
        sidebar_height: 120,
        divider: 16,
    };

    /// Terminal cell scale.
    pub const CELLS: Self = Self {
        video_width: 30,
        content_width: 34,
        sidebar_width: 30,
        video_height: 8,
        content_height: 10,
        sidebar_height: 6,
        divider: 1,
    };
}

/// Identifies a split within the tree of the active variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitId {
    /// The outer split of the measured container
    Main,
    /// The split nested inside one side of the outer split
    Nested,
}

/// Divider offsets chosen by dragging. Belongs to exactly one variant; a new
/// tree replaces it whenever the variant changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SplitTree {
    variant: LayoutVariant,
    main: Option<u16>,
    nested: Option<u16>,
}

impl SplitTree {
    fn new(variant: LayoutVariant) -> Self {
        Self {
            variant,
            main: None,
            nested: None,
        }
    }

    fn get(&self, id: SplitId) -> Option<u16> {
        match id {
            SplitId::Main => self.main,
            SplitId::Nested => self.nested,
        }
    }

    fn set(&mut self, id: SplitId, offset: u16) {
        match id {
            SplitId::Main => self.main = Some(offset),
            SplitId::Nested => self.nested = Some(offset),
        }
    }
}

/// A divider as placed on screen by the last arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerHandle {
    pub id: SplitId,
    pub axis: SplitAxis,
    pub rect: Rect,
    /// Coordinate of the split's origin along its axis
    pub origin: u16,
}

impl DividerHandle {
    pub fn hit(&self, column: u16, row: u16, zone: u16) -> bool {
        let r = self.rect;
        match self.axis {
            SplitAxis::Horizontal => {
                row >= r.y
                    && row < r.y + r.height
                    && column + zone >= r.x
                    && column <= (r.x + r.width).saturating_sub(1) + zone
            }
            SplitAxis::Vertical => {
                column >= r.x
                    && column < r.x + r.width
                    && row + zone >= r.y
                    && row <= (r.y + r.height).saturating_sub(1) + zone
            }
        }
    }
}

/// Region rectangles for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    pub video: Option<Rect>,
    pub focus: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub dividers: Vec<DividerHandle>,
}

impl Arrangement {
    pub fn divider(&self, id: SplitId) -> Option<&DividerHandle> {
        self.dividers.iter().find(|d| d.id == id)
    }
}

/// Layout manager state for the replay container.
#[derive(Debug)]
pub struct ReplayLayout {
    constraints: SizeConstraints,
    tree: SplitTree,
    measured: MeasuredSize,
    dragging: Option<SplitId>,
    fullscreen: bool,
}

impl ReplayLayout {
    /// Mount the layout, subscribing to container size changes.
    pub fn mount(
        variant: LayoutVariant,
        constraints: SizeConstraints,
        observer: &SizeObserver,
    ) -> Self {
        Self {
            constraints,
            tree: SplitTree::new(variant),
            measured: MeasuredSize::subscribe(observer),
            dragging: None,
            fullscreen: false,
        }
    }

    pub fn variant(&self) -> LayoutVariant {
        self.tree.variant
    }

    /// Switch variant. The split tree is rebuilt so every divider starts at
    /// the new variant's defaults.
    pub fn set_variant(&mut self, variant: LayoutVariant) {
        if variant == self.tree.variant {
            return;
        }
        tracing::debug!(from = %self.tree.variant, to = %variant, "switching layout");
        self.tree = SplitTree::new(variant);
        self.dragging = None;
    }

    /// Usable measured size, or None before the container has a non-empty box.
    pub fn measured_size(&self) -> Option<Size> {
        self.measured
            .get()
            .filter(|size| size.width > 0 && size.height > 0)
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.tree.variant.has_video() {
            self.fullscreen = !self.fullscreen;
            self.dragging = None;
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen && self.tree.variant.has_video()
    }

    pub fn dragging(&self) -> Option<SplitId> {
        self.dragging
    }

    /// Axis of `id` in the active variant.
    pub fn split_axis(&self, id: SplitId) -> Option<SplitAxis> {
        use LayoutVariant::*;
        match (self.tree.variant, id) {
            (Topbar, SplitId::Main) | (SidebarLeft, SplitId::Nested) => Some(SplitAxis::Vertical),
            (Topbar, SplitId::Nested) | (SidebarLeft, SplitId::Main) | (NoVideo, SplitId::Main) => {
                Some(SplitAxis::Horizontal)
            }
            _ => None,
        }
    }

    /// Divider bounds of `id` for the measured container.
    pub fn split_bounds(&self, id: SplitId) -> Option<SplitBounds> {
        let size = self.measured_size()?;
        let c = self.constraints;
        let (w, h, d) = (size.width, size.height, c.divider);
        let max_after = |extent: u16, reserve: u16| extent.saturating_sub(d).saturating_sub(reserve);

        use LayoutVariant::*;
        let bounds = match (self.tree.variant, id) {
            (Topbar, SplitId::Main) => {
                SplitBounds::with_ratio(h, d, 0.5, c.video_height, max_after(h, c.content_height))
            }
            (Topbar, SplitId::Nested) => {
                SplitBounds::with_ratio(w, d, 0.5, c.video_width, max_after(w, c.sidebar_width))
            }
            (SidebarLeft, SplitId::Main) => {
                SplitBounds::with_ratio(w, d, 0.5, c.sidebar_width, max_after(w, c.content_width))
            }
            (SidebarLeft, SplitId::Nested) => SplitBounds::with_ratio(
                h,
                d,
                0.65,
                c.content_height,
                max_after(h, c.sidebar_height),
            ),
            (NoVideo, SplitId::Main) => {
                SplitBounds::with_ratio(w, d, 0.9, 0, max_after(w, c.sidebar_width))
            }
            _ => return None,
        };
        Some(bounds)
    }

    /// Current divider offset: the dragged value if any, else the default,
    /// clamped to the bounds for the current size.
    pub fn offset(&self, id: SplitId) -> Option<u16> {
        let bounds = self.split_bounds(id)?;
        Some(
            self.tree
                .get(id)
                .map(|o| bounds.clamp(o))
                .unwrap_or(bounds.default),
        )
    }

    /// Arrange the regions inside the container whose top-left corner is at
    /// `area`. Produces no regions until a size has been measured.
    pub fn arrange(&self, area: Rect) -> Arrangement {
        let Some(size) = self.measured_size() else {
            return Arrangement::default();
        };
        let container = Rect::new(
            area.x,
            area.y,
            size.width.min(area.width),
            size.height.min(area.height),
        );
        if container.is_empty() {
            return Arrangement::default();
        }

        if self.is_fullscreen() {
            return Arrangement {
                video: Some(container),
                ..Arrangement::default()
            };
        }

        let d = self.constraints.divider;
        let mut arrangement = Arrangement::default();

        match self.tree.variant {
            LayoutVariant::VideoOnly => {
                arrangement.video = Some(container);
            }
            LayoutVariant::NoVideo => {
                let main = self.place(&mut arrangement, SplitId::Main, container, d);
                arrangement.focus = Some(main.first);
                arrangement.sidebar = Some(main.second);
            }
            LayoutVariant::SidebarLeft => {
                let main = self.place(&mut arrangement, SplitId::Main, container, d);
                let left = self.place(&mut arrangement, SplitId::Nested, main.first, d);
                arrangement.video = Some(left.first);
                arrangement.sidebar = Some(left.second);
                arrangement.focus = Some(main.second);
            }
            LayoutVariant::Topbar => {
                let main = self.place(&mut arrangement, SplitId::Main, container, d);
                let top = self.place(&mut arrangement, SplitId::Nested, main.first, d);
                arrangement.video = Some(top.first);
                arrangement.sidebar = Some(top.second);
                arrangement.focus = Some(main.second);
            }
        }

        arrangement
    }

    fn place(&self, arrangement: &mut Arrangement, id: SplitId, area: Rect, divider: u16) -> SplitRects {
        let axis = self.split_axis(id).unwrap_or(SplitAxis::Horizontal);
        let offset = self.offset(id).unwrap_or(0);
        let rects = split_area(area, axis, offset, divider);
        arrangement.dividers.push(DividerHandle {
            id,
            axis,
            rect: rects.divider,
            origin: axis.origin(area),
        });
        rects
    }

    /// Begin dragging the divider under the pointer, if any.
    pub fn start_drag(&mut self, arrangement: &Arrangement, column: u16, row: u16, zone: u16) -> bool {
        let hit = arrangement
            .dividers
            .iter()
            .find(|d| d.hit(column, row, zone))
            .map(|d| d.id);
        self.dragging = hit;
        hit.is_some()
    }

    /// Move the dragged divider to the pointer. Only that split changes.
    pub fn drag_to(&mut self, arrangement: &Arrangement, column: u16, row: u16) {
        let Some(id) = self.dragging else {
            return;
        };
        let (Some(handle), Some(bounds)) = (arrangement.divider(id), self.split_bounds(id)) else {
            return;
        };
        let pointer = match handle.axis {
            SplitAxis::Horizontal => column,
            SplitAxis::Vertical => row,
        };
        let offset = bounds.clamp(pointer.saturating_sub(handle.origin));
        tracing::trace!(?id, offset, usable = bounds.usable, "divider moved");
        self.tree.set(id, offset);
    }

    pub fn stop_drag(&mut self) {
        self.dragging = None;
    }
}
