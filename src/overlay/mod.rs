mod controller;
mod subscriptions;

pub use controller::OverlayController;
pub use subscriptions::{EventKind, Subscriptions};

use crate::placement::{Offset, Placement};

/// Lifecycle of one overlay instance. Transitions are strictly linear:
/// `Closed -> Opening -> Open -> Closing -> Closed`. `Opening` makes the
/// "content not yet measurable" window explicit; `Closing` brackets listener
/// teardown and focus restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Per-instance configuration. All fields are plain data; invalid placement
/// text is rejected with an error before a config can be built (see
/// [`crate::placement::Placement`]'s `FromStr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayConfig {
    pub placement: Placement,
    pub offset: Offset,
    pub viewport_padding: u16,
    pub close_on_outside_click: bool,
    pub close_on_escape: bool,
    pub close_on_scroll: bool,
    pub trap_focus: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            offset: Offset::default(),
            viewport_padding: 8,
            close_on_outside_click: true,
            close_on_escape: true,
            close_on_scroll: false,
            trap_focus: true,
        }
    }
}

impl OverlayConfig {
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_viewport_padding(mut self, padding: u16) -> Self {
        self.viewport_padding = padding;
        self
    }
}
