use crate::constants::{DRAWER_HANDLE_ALLOWANCE, DRAWER_MIN_HEIGHT};

/// Tabs of the request detail drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Details,
    Request,
    Response,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [Self::Details, Self::Request, Self::Response];

    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Request => "Request",
            Self::Response => "Response",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Details => Self::Request,
            Self::Request => Self::Response,
            Self::Response => Self::Details,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Details => Self::Response,
            Self::Request => Self::Details,
            Self::Response => Self::Request,
        }
    }
}

/// Vertically resizable drawer below the request grid.
#[derive(Debug, Default)]
pub struct ResizableDrawer {
    /// Height chosen by dragging; None follows the default
    height: Option<u16>,
    dragging: bool,
    pub tab: DetailTab,
}

impl ResizableDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest height inside `container`, leaving room for the handle and
    /// at least a sliver of the grid.
    pub fn max_height(container: u16) -> u16 {
        container.saturating_sub(DRAWER_HANDLE_ALLOWANCE)
    }

    /// Drawer height inside a container of `container` rows.
    pub fn height(&self, container: u16) -> u16 {
        let max = Self::max_height(container);
        let min = DRAWER_MIN_HEIGHT.min(max);
        self.height.unwrap_or(container / 2).clamp(min, max)
    }

    pub fn start_drag(&mut self) {
        self.dragging = true;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drag the handle to `row`, where the container spans `top..top + container`.
    pub fn drag_to(&mut self, row: u16, top: u16, container: u16) {
        if !self.dragging {
            return;
        }
        let bottom = top.saturating_add(container);
        // The handle sits on the row above the drawer
        let height = bottom.saturating_sub(row).saturating_sub(1);
        let max = Self::max_height(container);
        self.height = Some(height.clamp(DRAWER_MIN_HEIGHT.min(max), max));
    }

    pub fn stop_drag(&mut self) {
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_height_is_half() {
        let drawer = ResizableDrawer::new();
        assert_eq!(drawer.height(40), 20);
    }

    #[test]
    fn test_height_bounded_by_allowance() {
        let mut drawer = ResizableDrawer::new();
        drawer.start_drag();
        drawer.drag_to(0, 0, 40);
        assert_eq!(drawer.height(40), 40 - DRAWER_HANDLE_ALLOWANCE);

        drawer.drag_to(39, 0, 40);
        assert_eq!(drawer.height(40), DRAWER_MIN_HEIGHT);
        drawer.stop_drag();
        assert!(!drawer.is_dragging());
    }

    #[test]
    fn test_drag_requires_start() {
        let mut drawer = ResizableDrawer::new();
        drawer.drag_to(5, 0, 40);
        assert_eq!(drawer.height(40), 20);
    }

    #[test]
    fn test_tiny_container() {
        let drawer = ResizableDrawer::new();
        assert_eq!(drawer.height(3), 0);
        assert_eq!(drawer.height(6), 2);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(DetailTab::Details.next(), DetailTab::Request);
        assert_eq!(DetailTab::Details.prev(), DetailTab::Response);
        for tab in DetailTab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }
}
