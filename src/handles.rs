use std::cell::Cell;
use std::rc::Rc;

use crate::geom::Rect;

/// Where the caller mounts the floating panel. The engine only reports the
/// choice; rendering in place vs. into a detached root is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountTarget {
    #[default]
    InPlace,
    DetachedRoot,
}

/// The trigger element an overlay is positioned against. The engine requires
/// only that a rect can be measured from it; `None` means the element is
/// detached and the overlay must fail safe.
pub trait AnchorHandle {
    fn measure(&self) -> Option<Rect>;

    /// Hit test for outside-click detection. Default: point inside the
    /// measured rect; detached handles contain nothing.
    fn contains_point(&self, x: i32, y: i32) -> bool {
        self.measure().is_some_and(|rect| rect.contains(x, y))
    }
}

/// The floating panel itself. Same measurement requirement as the anchor,
/// plus the mount-target capability.
pub trait ContentHandle {
    fn measure(&self) -> Option<Rect>;

    fn contains_point(&self, x: i32, y: i32) -> bool {
        self.measure().is_some_and(|rect| rect.contains(x, y))
    }

    fn mount_target(&self) -> MountTarget {
        MountTarget::InPlace
    }
}

/// Shared measurement slot. Render code publishes the most recent rect into
/// the slot; the controller measures by reading it. Cloning shares the slot
/// (single-threaded `Rc` interior, matching the cooperative event-loop model).
#[derive(Debug, Clone, Default)]
pub struct SharedRegion {
    rect: Rc<Cell<Option<Rect>>>,
    mount: MountTarget,
}

impl SharedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detached_root() -> Self {
        Self {
            rect: Rc::new(Cell::new(None)),
            mount: MountTarget::DetachedRoot,
        }
    }

    pub fn set(&self, rect: Rect) {
        self.rect.set(Some(rect));
    }

    /// Marks the region as detached/unmeasurable.
    pub fn clear(&self) {
        self.rect.set(None);
    }

    pub fn get(&self) -> Option<Rect> {
        self.rect.get()
    }
}

impl AnchorHandle for SharedRegion {
    fn measure(&self) -> Option<Rect> {
        self.rect.get()
    }
}

impl ContentHandle for SharedRegion {
    fn measure(&self) -> Option<Rect> {
        self.rect.get()
    }

    fn mount_target(&self) -> MountTarget {
        self.mount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_region_clones_share_the_slot() {
        let region = SharedRegion::new();
        let alias = region.clone();
        assert!(AnchorHandle::measure(&region).is_none());
        alias.set(Rect::new(2, 3, 10, 5));
        assert_eq!(AnchorHandle::measure(&region), Some(Rect::new(2, 3, 10, 5)));
        region.clear();
        assert!(AnchorHandle::measure(&alias).is_none());
    }

    #[test]
    fn contains_point_follows_measurement() {
        let region = SharedRegion::new();
        assert!(!AnchorHandle::contains_point(&region, 5, 5));
        region.set(Rect::new(0, 0, 10, 10));
        assert!(AnchorHandle::contains_point(&region, 5, 5));
        assert!(!AnchorHandle::contains_point(&region, 10, 5));
    }

    #[test]
    fn mount_target_is_fixed_at_construction() {
        assert_eq!(
            ContentHandle::mount_target(&SharedRegion::new()),
            MountTarget::InPlace
        );
        assert_eq!(
            ContentHandle::mount_target(&SharedRegion::detached_root()),
            MountTarget::DetachedRoot
        );
    }
}
