//! Single-threaded event queue.
//!
//! Subscription sinks only enqueue. The session drains the queue from its
//! own call stack, so no handler ever runs while another is in progress.

use hireboard_source::{EventSink, SourceEvent};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<SourceEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sink that appends to this queue.
    pub fn sink(&self) -> EventSink {
        let events = self.events.clone();
        Rc::new(move |event: SourceEvent| events.borrow_mut().push_back(event))
    }

    /// Removes the oldest event.
    ///
    /// The borrow ends before the caller handles the event, so handlers may
    /// enqueue more events.
    pub fn pop(&self) -> Option<SourceEvent> {
        self.events.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
