use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct GateInner {
    observed: Cell<bool>,
    hooks: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_hook_id: Cell<u64>,
}

/// Records that a user gesture has happened at least once on the page.
///
/// Browsers only allow unmuted playback after a gesture; the owner of the
/// gate feeds it the first one and every subscribed player unmutes.
#[derive(Clone, Default)]
pub struct InteractionGate {
    inner: Rc<GateInner>,
}

impl InteractionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observed(&self) -> bool {
        self.inner.observed.get()
    }

    /// Marks the gesture as seen. Hooks run on the first call only.
    pub fn observe(&self) -> bool {
        if self.inner.observed.replace(true) {
            return false;
        }
        let hooks: Vec<Rc<dyn Fn()>> = self
            .inner
            .hooks
            .borrow()
            .iter()
            .map(|(_, hook)| hook.clone())
            .collect();
        for hook in hooks {
            hook();
        }
        true
    }

    pub fn subscribe(&self, hook: Rc<dyn Fn()>) -> u64 {
        let id = self.inner.next_hook_id.get().saturating_add(1);
        self.inner.next_hook_id.set(id);
        self.inner.hooks.borrow_mut().push((id, hook));
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        self.inner
            .hooks
            .borrow_mut()
            .retain(|(hook_id, _)| *hook_id != id);
    }
}
