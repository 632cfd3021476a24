//! Event type definitions.

use crate::geometry::Span;
use crate::gesture::Gesture;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to the data set that was active when an event was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRef(String);

impl DatasetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Side-channel value attached to a range event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaneValue {
    Char(char),
    Number(f64),
    Text(String),
    Flag(bool),
}

/// A single selected point, in device coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointEvent {
    position: Point,
    dataset: Option<DatasetRef>,
}

impl PointEvent {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            dataset: None,
        }
    }

    /// Attach the active data set.
    pub fn with_dataset(mut self, dataset: Option<DatasetRef>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn dataset(&self) -> Option<&DatasetRef> {
        self.dataset.as_ref()
    }
}

/// Extent of a range selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RangeExtent {
    /// Two-axis box.
    Box { x: Span, y: Span },
    /// Horizontal range, with the vertical position it was made at.
    Horizontal { x: Span, reference: Option<f64> },
    /// Vertical range, with the horizontal position it was made at.
    Vertical { y: Span, reference: Option<f64> },
}

/// A box or single-axis range selection, in device coordinates.
///
/// Spans are normalized at construction, so `min <= max` whatever the drag direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEvent {
    extent: RangeExtent,
    planes: BTreeMap<String, PlaneValue>,
}

impl RangeEvent {
    /// Box selection spanning two corners.
    pub fn boxed(a: Point, b: Point) -> Self {
        Self::from_extent(RangeExtent::Box {
            x: Span::new(a.x, b.x),
            y: Span::new(a.y, b.y),
        })
    }

    /// Box selection covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::boxed(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1))
    }

    /// Horizontal range between `x0` and `x1`.
    pub fn horizontal(x0: f64, x1: f64, reference: Option<f64>) -> Self {
        Self::from_extent(RangeExtent::Horizontal {
            x: Span::new(x0, x1),
            reference,
        })
    }

    /// Vertical range between `y0` and `y1`.
    pub fn vertical(y0: f64, y1: f64, reference: Option<f64>) -> Self {
        Self::from_extent(RangeExtent::Vertical {
            y: Span::new(y0, y1),
            reference,
        })
    }

    fn from_extent(extent: RangeExtent) -> Self {
        Self {
            extent,
            planes: BTreeMap::new(),
        }
    }

    /// Attach a named plane. Used while building, before the event is delivered.
    pub fn with_plane(mut self, name: impl Into<String>, value: PlaneValue) -> Self {
        self.planes.insert(name.into(), value);
        self
    }

    pub fn extent(&self) -> RangeExtent {
        self.extent
    }

    /// Horizontal span, if the event has one.
    pub fn x_range(&self) -> Option<Span> {
        match self.extent {
            RangeExtent::Box { x, .. } | RangeExtent::Horizontal { x, .. } => Some(x),
            RangeExtent::Vertical { .. } => None,
        }
    }

    /// Vertical span, if the event has one.
    pub fn y_range(&self) -> Option<Span> {
        match self.extent {
            RangeExtent::Box { y, .. } | RangeExtent::Vertical { y, .. } => Some(y),
            RangeExtent::Horizontal { .. } => None,
        }
    }

    /// Reference position on the perpendicular axis of a single-axis range.
    pub fn reference(&self) -> Option<f64> {
        match self.extent {
            RangeExtent::Horizontal { reference, .. }
            | RangeExtent::Vertical { reference, .. } => reference,
            RangeExtent::Box { .. } => None,
        }
    }

    pub fn plane(&self, name: &str) -> Option<&PlaneValue> {
        self.planes.get(name)
    }

    pub fn planes(&self) -> &BTreeMap<String, PlaneValue> {
        &self.planes
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureEvent {
    gesture: Gesture,
    origin: Point,
}

impl GestureEvent {
    pub(crate) fn new(gesture: Gesture, origin: Point) -> Self {
        Self { gesture, origin }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Device point where the gesture started.
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// Any event a strategy can promote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    Point(PointEvent),
    Range(RangeEvent),
    Gesture(GestureEvent),
}

impl SelectionEvent {
    pub fn as_point(&self) -> Option<&PointEvent> {
        match self {
            SelectionEvent::Point(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeEvent> {
        match self {
            SelectionEvent::Range(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_gesture(&self) -> Option<&GestureEvent> {
        match self {
            SelectionEvent::Gesture(e) => Some(e),
            _ => None,
        }
    }

    /// Attach a plane to a range event; other kinds pass through unchanged.
    pub fn with_plane(self, name: impl Into<String>, value: PlaneValue) -> Self {
        match self {
            SelectionEvent::Range(e) => SelectionEvent::Range(e.with_plane(name, value)),
            other => other,
        }
    }
}

impl From<PointEvent> for SelectionEvent {
    fn from(event: PointEvent) -> Self {
        SelectionEvent::Point(event)
    }
}

impl From<RangeEvent> for SelectionEvent {
    fn from(event: RangeEvent) -> Self {
        SelectionEvent::Range(event)
    }
}

impl From<GestureEvent> for SelectionEvent {
    fn from(event: GestureEvent) -> Self {
        SelectionEvent::Gesture(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_normalized_in_every_direction() {
        let origin = Point::new(50.0, 50.0);
        for end in [
            Point::new(80.0, 90.0),
            Point::new(20.0, 90.0),
            Point::new(80.0, 10.0),
            Point::new(20.0, 10.0),
        ] {
            let event = RangeEvent::boxed(origin, end);
            let x = event.x_range().unwrap();
            let y = event.y_range().unwrap();
            assert!(x.min() <= x.max());
            assert!(y.min() <= y.max());
        }
    }

    #[test]
    fn test_single_axis_ranges() {
        let h = RangeEvent::horizontal(30.0, 10.0, Some(5.0));
        assert_eq!(h.x_range().unwrap().min(), 10.0);
        assert!(h.y_range().is_none());
        assert_eq!(h.reference(), Some(5.0));

        let v = RangeEvent::vertical(1.0, 2.0, None);
        assert!(v.x_range().is_none());
        assert_eq!(v.reference(), None);
    }

    #[test]
    fn test_planes() {
        let event = SelectionEvent::from(RangeEvent::boxed(Point::ZERO, Point::new(1.0, 1.0)))
            .with_plane("key_char", PlaneValue::Char('a'));
        let range = event.as_range().unwrap();
        assert_eq!(range.plane("key_char"), Some(&PlaneValue::Char('a')));
        assert!(range.plane("missing").is_none());
    }

    #[test]
    fn test_with_plane_ignores_non_range() {
        let event = SelectionEvent::from(PointEvent::new(Point::new(1.0, 2.0)))
            .with_plane("key_char", PlaneValue::Char('a'));
        assert_eq!(event.as_point().unwrap().x(), 1.0);
    }

    #[test]
    fn test_point_event_dataset() {
        let event =
            PointEvent::new(Point::new(3.0, 4.0)).with_dataset(Some(DatasetRef::new("flux")));
        assert_eq!(event.dataset().map(DatasetRef::as_str), Some("flux"));
        assert_eq!(event.y(), 4.0);
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = SelectionEvent::from(RangeEvent::horizontal(1.0, 2.0, None));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "range");
        assert_eq!(json["extent"]["shape"], "horizontal");
    }
}
