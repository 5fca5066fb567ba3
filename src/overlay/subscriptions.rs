use std::collections::BTreeSet;

/// Host event streams a controller can subscribe to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Resize,
    Scroll,
    PointerDown,
    KeyDown,
}

/// Per-instance listener set. Each controller owns exactly one of these;
/// nothing is shared between instances, so clearing it on close provably
/// removes every listener that instance registered.
#[derive(Debug, Default)]
pub struct Subscriptions {
    active: BTreeSet<EventKind>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind) {
        self.active.insert(kind);
    }

    pub fn unsubscribe(&mut self, kind: EventKind) {
        self.active.remove(&kind);
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Synchronous teardown of everything registered.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_is_idempotent() {
        let mut subs = Subscriptions::new();
        subs.subscribe(EventKind::Resize);
        subs.subscribe(EventKind::Resize);
        assert_eq!(subs.len(), 1);
        assert!(subs.contains(EventKind::Resize));
        assert!(!subs.contains(EventKind::Scroll));
    }

    #[test]
    fn clear_removes_everything() {
        let mut subs = Subscriptions::new();
        subs.subscribe(EventKind::Resize);
        subs.subscribe(EventKind::Scroll);
        subs.subscribe(EventKind::PointerDown);
        subs.subscribe(EventKind::KeyDown);
        assert_eq!(subs.len(), 4);
        subs.clear();
        assert!(subs.is_empty());
    }

    #[test]
    fn unsubscribe_single_kind() {
        let mut subs = Subscriptions::new();
        subs.subscribe(EventKind::KeyDown);
        subs.subscribe(EventKind::Scroll);
        subs.unsubscribe(EventKind::KeyDown);
        assert!(!subs.contains(EventKind::KeyDown));
        assert!(subs.contains(EventKind::Scroll));
    }
}
