//! Single-threaded state container.
//!
//! Holds the current [`AppState`] snapshot, applies actions through the
//! reducer and notifies listeners with the new snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::{Action, AppState, reduce};

type Listener = Rc<dyn Fn(&AppState)>;

#[derive(Default)]
struct Inner {
    state: RefCell<AppState>,
    listeners: RefCell<Vec<Listener>>,
}

/// Cheap to clone; all clones share one state.
#[derive(Clone, Default)]
pub struct Store {
    inner: Rc<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure with shared read access to the current state.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        f(&self.inner.state.borrow())
    }

    pub fn snapshot(&self) -> AppState {
        self.with(AppState::clone)
    }

    pub fn dispatch(&self, action: Action) {
        let next = {
            let mut state = self.inner.state.borrow_mut();
            let next = reduce(&state, action);
            *state = next.clone();
            next
        };
        // Listeners may dispatch again, so neither cell stays borrowed.
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }

    pub fn listen(&self, listener: impl Fn(&AppState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }
}
