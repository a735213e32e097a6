//! Page-lifetime reader state
//!
//! Holds the reading direction and the mounted document. Writers are
//! the bootstrap (seeding the context), the direction toggle (flipping
//! the flag) and the viewer adapter (replacing the context after a
//! successful mount). Only the event loop touches it, so plain
//! `Cell`/`RefCell` suffice.

use std::cell::{Cell, RefCell};

use crate::document::{Direction, SessionContext};

#[derive(Debug, Default)]
pub struct SessionState {
    direction: Cell<Direction>,
    context: RefCell<Option<SessionContext>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Direction {
        self.direction.get()
    }

    /// Flip the direction flag and return the new value
    pub fn toggle_direction(&self) -> Direction {
        let next = self.direction.get().toggled();
        self.direction.set(next);
        next
    }

    pub fn context(&self) -> Option<SessionContext> {
        self.context.borrow().clone()
    }

    pub fn replace_context(&self, context: SessionContext) {
        *self.context.borrow_mut() = Some(context);
    }
}
