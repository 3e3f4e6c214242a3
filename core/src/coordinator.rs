use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

struct ActiveEntry {
    id: PlayerId,
    preempt: Rc<dyn Fn()>,
}

#[derive(Default)]
struct CoordinatorInner {
    next_id: Cell<u64>,
    active: RefCell<Option<ActiveEntry>>,
}

/// Single slot shared by every player of a page: at most one of them plays.
///
/// Cloning shares the slot. Claiming it while another player holds it runs
/// that player's preemption hook first, outside of any borrow, so the hook is
/// free to call back into `release`.
#[derive(Clone, Default)]
pub struct PlaybackCoordinator {
    inner: Rc<CoordinatorInner>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&self) -> PlayerId {
        let id = self.inner.next_id.get().saturating_add(1);
        self.inner.next_id.set(id);
        PlayerId(id)
    }

    /// Claims the slot for `id`; returns the player that was preempted.
    pub fn acquire(&self, id: PlayerId, preempt: Rc<dyn Fn()>) -> Option<PlayerId> {
        let previous = {
            let mut slot = self.inner.active.borrow_mut();
            match slot.as_ref() {
                Some(entry) if entry.id == id => None,
                _ => slot.take(),
            }
        };
        if let Some(entry) = previous.as_ref() {
            (entry.preempt)();
        }
        *self.inner.active.borrow_mut() = Some(ActiveEntry { id, preempt });
        previous.map(|entry| entry.id)
    }

    pub fn release(&self, id: PlayerId) -> bool {
        let mut slot = self.inner.active.borrow_mut();
        if slot.as_ref().map(|entry| entry.id) == Some(id) {
            slot.take();
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<PlayerId> {
        self.inner.active.borrow().as_ref().map(|entry| entry.id)
    }

    pub fn is_active(&self, id: PlayerId) -> bool {
        self.active() == Some(id)
    }
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("active", &self.active())
            .finish()
    }
}
