use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Access to the host's focus singleton. The controller reads it once per
/// open (snapshot), optionally moves it onto the content while open, and
/// writes it back once per close — after re-checking attachment, since the
/// snapshot's target may be gone by then.
pub trait FocusScope {
    type Token: Clone + PartialEq + fmt::Debug;

    fn current(&self) -> Option<Self::Token>;

    fn focus(&mut self, token: &Self::Token);

    fn is_attached(&self, token: &Self::Token) -> bool;
}

pub type FocusId = usize;

/// Registry of attached focusable nodes with at most one focused at a time.
#[derive(Debug, Default)]
pub struct FocusRegistry {
    attached: BTreeSet<FocusId>,
    focused: Option<FocusId>,
}

impl FocusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, id: FocusId) {
        self.attached.insert(id);
    }

    /// Detaching the focused node leaves nothing focused.
    pub fn detach(&mut self, id: FocusId) {
        self.attached.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Focus moves only onto attached nodes.
    pub fn focus(&mut self, id: FocusId) {
        if self.attached.contains(&id) {
            self.focused = Some(id);
        }
    }

    pub fn current(&self) -> Option<FocusId> {
        self.focused
    }

    pub fn is_attached(&self, id: FocusId) -> bool {
        self.attached.contains(&id)
    }
}

/// Shared handle to the registry for the single-threaded cooperative model.
pub type SharedFocus = Rc<RefCell<FocusRegistry>>;

pub fn shared() -> SharedFocus {
    Rc::new(RefCell::new(FocusRegistry::new()))
}

impl FocusScope for SharedFocus {
    type Token = FocusId;

    fn current(&self) -> Option<FocusId> {
        self.borrow().current()
    }

    fn focus(&mut self, token: &FocusId) {
        self.borrow_mut().focus(*token);
    }

    fn is_attached(&self, token: &FocusId) -> bool {
        self.borrow().is_attached(*token)
    }
}
