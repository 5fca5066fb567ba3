use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};

use super::{EventKind, OverlayConfig, OverlayState, Subscriptions};
use crate::focus::FocusScope;
use crate::geom::Rect;
use crate::handles::{AnchorHandle, ContentHandle, MountTarget};
use crate::placement::{ComputedPosition, ViewportBounds, compute};

/// Drives one floating panel's lifecycle: when to measure and position it,
/// when to dismiss it, and who gets focus on the way in and out.
///
/// The placement math itself lives in [`crate::placement::compute`]; this type
/// owns the side effects a pure resolver must not own — event subscriptions
/// and the focus singleton. One controller per overlay; concurrently open
/// overlays are fully independent instances.
pub struct OverlayController<A, C, F>
where
    A: AnchorHandle,
    C: ContentHandle,
    F: FocusScope,
{
    config: OverlayConfig,
    state: OverlayState,
    viewport: Rect,
    content: C,
    focus: F,
    /// Focus token for the content panel, targeted when `trap_focus` is set.
    content_focus: Option<F::Token>,
    anchor: Option<A>,
    /// Captured exactly once per open transition, consumed exactly once per
    /// close transition.
    focus_snapshot: Option<F::Token>,
    subscriptions: Subscriptions,
    position: Option<ComputedPosition>,
    on_open: Option<Box<dyn FnMut()>>,
    on_close: Option<Box<dyn FnMut()>>,
    on_positioned: Option<Box<dyn FnMut(ComputedPosition)>>,
}

impl<A, C, F> OverlayController<A, C, F>
where
    A: AnchorHandle,
    C: ContentHandle,
    F: FocusScope,
{
    pub fn new(content: C, focus: F, viewport: Rect, config: OverlayConfig) -> Self {
        Self {
            config,
            state: OverlayState::Closed,
            viewport,
            content,
            focus,
            content_focus: None,
            anchor: None,
            focus_snapshot: None,
            subscriptions: Subscriptions::new(),
            position: None,
            on_open: None,
            on_close: None,
            on_positioned: None,
        }
    }

    /// Token representing the content panel in the focus scope; required for
    /// `trap_focus` to have an effect.
    pub fn set_content_focus(&mut self, token: F::Token) {
        self.content_focus = Some(token);
    }

    pub fn on_open(&mut self, callback: impl FnMut() + 'static) {
        self.on_open = Some(Box::new(callback));
    }

    pub fn on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    pub fn on_positioned(&mut self, callback: impl FnMut(ComputedPosition) + 'static) {
        self.on_positioned = Some(Box::new(callback));
    }

    /// Boolean projection of the lifecycle: true from `open()` until the
    /// matching close completes.
    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Opening | OverlayState::Open)
    }

    /// Read-only state for diagnostics; grants no transition authority.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn position(&self) -> Option<ComputedPosition> {
        self.position
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn mount_target(&self) -> MountTarget {
        self.content.mount_target()
    }

    /// Number of host event listeners currently registered by this instance.
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// The host informs the controller of the current viewport; also updated
    /// automatically from resize events.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Opens the overlay against `anchor`. Valid only from `Closed`; calls in
    /// any other state are ignored (a usage race, not an error). Captures the
    /// focus snapshot, registers subscriptions, and attempts the first
    /// placement. If the content cannot be measured yet the controller stays
    /// in `Opening` and retries on the next event or tick instead of
    /// positioning against a zero-sized box.
    pub fn open(&mut self, anchor: A) {
        if self.state != OverlayState::Closed {
            tracing::debug!(state = ?self.state, "open ignored; overlay is not closed");
            return;
        }
        self.state = OverlayState::Opening;
        self.focus_snapshot = self.focus.current();
        self.anchor = Some(anchor);
        self.subscriptions.subscribe(EventKind::Resize);
        self.subscriptions.subscribe(EventKind::Scroll);
        if self.config.close_on_outside_click {
            self.subscriptions.subscribe(EventKind::PointerDown);
        }
        if self.config.close_on_escape {
            self.subscriptions.subscribe(EventKind::KeyDown);
        }
        self.try_position();
    }

    /// Closes the overlay. Valid from `Opening` or `Open`; idempotent from
    /// `Closed`. Listener teardown happens first and synchronously, so no
    /// stale callback can reposition or reopen an overlay the caller believes
    /// is closed; a close always wins over a pending reposition.
    pub fn close(&mut self) {
        if matches!(self.state, OverlayState::Closed | OverlayState::Closing) {
            return;
        }
        self.state = OverlayState::Closing;
        self.subscriptions.clear();
        if let Some(token) = self.focus_snapshot.take() {
            if self.focus.is_attached(&token) {
                self.focus.focus(&token);
            } else {
                tracing::debug!(?token, "focus snapshot target detached; leaving focus untouched");
            }
        }
        self.anchor = None;
        self.position = None;
        self.state = OverlayState::Closed;
        tracing::debug!("overlay closed");
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }

    /// Re-measures anchor and content and recomputes the position. Callable
    /// only while `Open` (the resize/scroll subscriptions call it internally;
    /// callers may invoke it when the content size changes). A detached
    /// anchor fails safe: the overlay closes instead of positioning against a
    /// stale rect, surfaced only through the normal `on_close` notification.
    pub fn reposition(&mut self) {
        if self.state != OverlayState::Open {
            return;
        }
        self.try_position();
    }

    /// Idle hook: retries the deferred first placement while `Opening`.
    pub fn on_tick(&mut self) {
        if self.state == OverlayState::Opening {
            self.try_position();
        }
    }

    /// Routes one host event through this instance's subscriptions. Returns
    /// true when the event was consumed (dismissal or reposition).
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(width, height) => {
                // Track the viewport even while closed so the next open
                // positions against current bounds.
                self.viewport = Rect::new(0, 0, *width, *height);
                if !self.subscriptions.contains(EventKind::Resize) {
                    return false;
                }
                match self.state {
                    OverlayState::Open => self.reposition(),
                    OverlayState::Opening => self.try_position(),
                    _ => return false,
                }
                true
            }
            Event::Mouse(mouse) => {
                let column = mouse.column as i32;
                let row = mouse.row as i32;
                match mouse.kind {
                    MouseEventKind::Down(_) => {
                        if !self.subscriptions.contains(EventKind::PointerDown) {
                            return false;
                        }
                        let inside = self.content.contains_point(column, row)
                            || self
                                .anchor
                                .as_ref()
                                .is_some_and(|anchor| anchor.contains_point(column, row));
                        if inside {
                            false
                        } else {
                            tracing::debug!(column, row, "outside pointer-down; dismissing");
                            self.close();
                            true
                        }
                    }
                    MouseEventKind::ScrollUp
                    | MouseEventKind::ScrollDown
                    | MouseEventKind::ScrollLeft
                    | MouseEventKind::ScrollRight => {
                        if !self.subscriptions.contains(EventKind::Scroll) {
                            return false;
                        }
                        if self.config.close_on_scroll {
                            self.close();
                        } else {
                            match self.state {
                                OverlayState::Open => self.reposition(),
                                OverlayState::Opening => self.try_position(),
                                _ => return false,
                            }
                        }
                        true
                    }
                    _ => false,
                }
            }
            Event::Key(key) => {
                if !self.subscriptions.contains(EventKind::KeyDown) {
                    return false;
                }
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Esc {
                    self.close();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn try_position(&mut self) {
        let content_rect = match self.content.measure() {
            Some(rect) => rect,
            None if self.state == OverlayState::Opening => {
                tracing::trace!("content not yet measurable; deferring placement");
                return;
            }
            None => {
                tracing::debug!("content no longer measurable; dismissing");
                self.close();
                return;
            }
        };
        let anchor_rect = self.anchor.as_ref().and_then(AnchorHandle::measure);
        let Some(anchor_rect) = anchor_rect else {
            tracing::debug!("anchor detached; dismissing");
            self.close();
            return;
        };
        let bounds = ViewportBounds::new(self.viewport, self.config.viewport_padding);
        let position = compute(
            anchor_rect,
            content_rect,
            self.config.placement,
            self.config.offset,
            bounds,
        );
        self.position = Some(position);
        if self.state == OverlayState::Opening {
            self.state = OverlayState::Open;
            tracing::debug!(
                x = position.x,
                y = position.y,
                placement = %position.placement_used,
                "overlay opened"
            );
            if self.config.trap_focus
                && let Some(token) = self.content_focus.clone()
            {
                self.focus.focus(&token);
            }
            if let Some(callback) = self.on_open.as_mut() {
                callback();
            }
        }
        if let Some(callback) = self.on_positioned.as_mut() {
            callback(position);
        }
    }
}
