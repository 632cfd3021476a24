//! Domain events produced by interactions, and the listener lists that deliver them.
//!
//! Events are immutable once built. Listeners receive them by reference through
//! synchronous callbacks, in the order they were added.

mod listeners;
mod types;

pub use listeners::{EventHub, ListenerId, Listeners};
pub use types::{
    DatasetRef, GestureEvent, PlaneValue, PointEvent, RangeEvent, RangeExtent, SelectionEvent,
};
