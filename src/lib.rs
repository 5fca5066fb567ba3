//! Floating-overlay placement and lifecycle management for terminal UIs.
//!
//! Two cooperating pieces, usable independently or together:
//!
//! - [`placement::compute`] — a pure resolver: given an anchor box, a content
//!   box, a requested [`placement::Placement`], an offset, and viewport
//!   bounds, it returns the top/left to draw at and the effective placement
//!   after collision handling (a single flip plus a cross-axis clamp).
//! - [`overlay::OverlayController`] — the open/closed state machine for one
//!   floating panel: it invokes the resolver on open/scroll/resize, wires
//!   outside-click and Escape dismissal, and captures/restores focus.
//!
//! Anchors and panels reach the engine through the capability traits in
//! [`handles`]; the host's focus singleton through [`focus::FocusScope`].
//! Everything is single-threaded and event-driven: correctness rests on
//! strictly ordered state transitions and idempotent close, not on locks.

pub mod error;
pub mod event_loop;
pub mod focus;
pub mod geom;
pub mod handles;
pub mod overlay;
pub mod panel;
pub mod placement;
pub mod tracing_sub;

pub use error::OverlayError;
pub use geom::Rect;
pub use handles::{AnchorHandle, ContentHandle, MountTarget, SharedRegion};
pub use overlay::{OverlayConfig, OverlayController, OverlayState};
pub use placement::{Alignment, ComputedPosition, Offset, Placement, Side, ViewportBounds, compute};
