use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use term_overlay::focus::{self, SharedFocus};
use term_overlay::geom::Rect;
use term_overlay::overlay::{OverlayConfig, OverlayController, OverlayState};
use term_overlay::{MountTarget, SharedRegion};

const TRIGGER: usize = 1;
const PANEL: usize = 2;

fn controller(
    anchor: &SharedRegion,
    content: &SharedRegion,
    focus: &SharedFocus,
    config: OverlayConfig,
) -> OverlayController<SharedRegion, SharedRegion, SharedFocus> {
    anchor.set(Rect::new(10, 2, 10, 1));
    content.set(Rect::new(0, 0, 24, 5));
    focus.borrow_mut().attach(TRIGGER);
    focus.borrow_mut().attach(PANEL);
    focus.borrow_mut().focus(TRIGGER);
    let mut controller =
        OverlayController::new(content.clone(), focus.clone(), Rect::new(0, 0, 100, 30), config);
    controller.set_content_focus(PANEL);
    controller
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn full_cycle_with_event_log() {
    let anchor = SharedRegion::new();
    let content = SharedRegion::new();
    let focus = focus::shared();
    let mut overlay = controller(&anchor, &content, &focus, OverlayConfig::default());

    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let log = log.clone();
        overlay.on_open(move || log.borrow_mut().push("open".into()));
    }
    {
        let log = log.clone();
        overlay.on_close(move || log.borrow_mut().push("close".into()));
    }
    {
        let log = log.clone();
        overlay.on_positioned(move |pos| {
            log.borrow_mut().push(format!("pos {},{}", pos.x, pos.y))
        });
    }

    overlay.open(anchor.clone());
    assert!(overlay.is_open());
    // Anchor bottom is 3; default offset pushes the panel to y = 11.
    assert_eq!(log.borrow().as_slice(), ["open", "pos 10,11"]);

    // Scroll moves the anchor in the host UI; the overlay follows.
    anchor.set(Rect::new(10, 1, 10, 1));
    overlay.handle_event(&Event::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollUp,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    }));
    assert_eq!(log.borrow().last().unwrap(), "pos 10,10");

    overlay.handle_event(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    assert!(!overlay.is_open());
    assert_eq!(log.borrow().last().unwrap(), "close");
    assert_eq!(overlay.listener_count(), 0);

    // Closing again adds nothing to the log.
    overlay.close();
    assert_eq!(log.borrow().iter().filter(|e| *e == "close").count(), 1);
}

#[test]
fn two_overlays_are_independent() {
    let focus = focus::shared();
    let anchor_a = SharedRegion::new();
    let content_a = SharedRegion::new();
    let mut a = controller(&anchor_a, &content_a, &focus, OverlayConfig::default());

    let anchor_b = SharedRegion::new();
    let content_b = SharedRegion::new();
    anchor_b.set(Rect::new(40, 2, 10, 1));
    content_b.set(Rect::new(0, 0, 24, 5));
    let mut b = OverlayController::new(
        content_b.clone(),
        focus.clone(),
        Rect::new(0, 0, 80, 24),
        OverlayConfig {
            trap_focus: false,
            ..OverlayConfig::default()
        },
    );

    a.open(anchor_a.clone());
    b.open(anchor_b.clone());
    assert!(a.is_open() && b.is_open());
    assert_eq!(a.listener_count(), 4);
    assert_eq!(b.listener_count(), 4);

    // Dismissing one leaves the other's subscriptions untouched.
    a.close();
    assert_eq!(a.listener_count(), 0);
    assert!(b.is_open());
    assert_eq!(b.listener_count(), 4);
    b.close();
    assert_eq!(b.listener_count(), 0);
}

#[test]
fn outside_click_closes_only_overlays_it_misses() {
    let focus = focus::shared();
    let anchor = SharedRegion::new();
    let content = SharedRegion::new();
    let mut overlay = controller(&anchor, &content, &focus, OverlayConfig::default());

    overlay.open(anchor.clone());
    let pos = overlay.position().unwrap();
    content.set(Rect::new(pos.x, pos.y, 24, 5));

    // A click on the panel keeps it open; a click elsewhere closes it.
    assert!(!overlay.handle_event(&click(pos.x as u16 + 2, pos.y as u16 + 2)));
    assert_eq!(overlay.state(), OverlayState::Open);
    assert!(overlay.handle_event(&click(79, 23)));
    assert_eq!(overlay.state(), OverlayState::Closed);
}

#[test]
fn deferred_open_settles_on_later_tick() {
    let focus = focus::shared();
    let anchor = SharedRegion::new();
    let content = SharedRegion::new();
    let mut overlay = controller(&anchor, &content, &focus, OverlayConfig::default());

    // Content is not mounted yet at open time.
    content.clear();
    overlay.open(anchor.clone());
    assert_eq!(overlay.state(), OverlayState::Opening);
    assert!(overlay.position().is_none());

    content.set(Rect::new(0, 0, 24, 5));
    overlay.on_tick();
    assert_eq!(overlay.state(), OverlayState::Open);
    assert!(overlay.position().is_some());
}

#[test]
fn detached_anchor_closes_instead_of_going_stale() {
    let focus = focus::shared();
    let anchor = SharedRegion::new();
    let content = SharedRegion::new();
    let mut overlay = controller(&anchor, &content, &focus, OverlayConfig::default());

    overlay.open(anchor.clone());
    anchor.clear();
    overlay.reposition();
    assert_eq!(overlay.state(), OverlayState::Closed);
    assert_eq!(overlay.listener_count(), 0);
}

#[test]
fn focus_round_trip_across_the_cycle() {
    let focus = focus::shared();
    let anchor = SharedRegion::new();
    let content = SharedRegion::new();
    let mut overlay = controller(&anchor, &content, &focus, OverlayConfig::default());

    assert_eq!(focus.borrow().current(), Some(TRIGGER));
    overlay.open(anchor.clone());
    assert_eq!(focus.borrow().current(), Some(PANEL));
    overlay.close();
    assert_eq!(focus.borrow().current(), Some(TRIGGER));
}

#[test]
fn mount_target_is_reported_from_the_content_handle() {
    let focus = focus::shared();
    let anchor = SharedRegion::new();
    let content = SharedRegion::detached_root();
    let overlay = controller(&anchor, &content, &focus, OverlayConfig::default());
    assert_eq!(overlay.mount_target(), MountTarget::DetachedRoot);
}
