//! Ordered multicast listener lists.

use super::types::{GestureEvent, PointEvent, RangeEvent, SelectionEvent};
use std::fmt;

/// Handle returned when adding a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of callbacks for one event kind.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("len", &self.entries.len()).finish()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. It is called after every listener added before it.
    pub fn add(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not present.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Call every listener, in insertion order.
    pub fn fire(&mut self, event: &E) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One listener list per event kind.
#[derive(Debug, Default)]
pub struct EventHub {
    pub point: Listeners<PointEvent>,
    pub range: Listeners<RangeEvent>,
    pub gesture: Listeners<GestureEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an event to the listeners for its kind.
    pub fn deliver(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::Point(e) => self.point.fire(e),
            SelectionEvent::Range(e) => self.range.fire(e),
            SelectionEvent::Gesture(e) => self.gesture.fire(e),
        }
    }
}
