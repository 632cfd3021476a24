//! Geometry provider interface, value spans and the axis frame used for readouts.

use crate::region::ControlRegion;
use crate::surface::Surface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Axis orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A closed interval, normalized so that `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    min: f64,
    max: f64,
}

impl Span {
    /// Create a span from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Origin and current point of an open drag, in the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragSpan {
    pub origin: Point,
    pub current: Point,
}

impl DragSpan {
    /// A span that has not moved yet.
    pub fn at(origin: Point) -> Self {
        Self { origin, current: origin }
    }

    pub fn delta(&self) -> Vec2 {
        self.current - self.origin
    }
}

/// Mapping between data values and device pixels along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    pub data_min: f64,
    pub data_max: f64,
    /// Pixel position of `data_min`.
    pub pixel_min: f64,
    /// Pixel position of `data_max`. May be smaller than `pixel_min` (y axes grow upward).
    pub pixel_max: f64,
    #[serde(default)]
    pub log: bool,
}

impl AxisMapping {
    /// Create a linear mapping.
    pub fn linear(data: (f64, f64), pixels: (f64, f64)) -> Self {
        Self {
            data_min: data.0,
            data_max: data.1,
            pixel_min: pixels.0,
            pixel_max: pixels.1,
            log: false,
        }
    }

    /// Create a base-10 logarithmic mapping. Data bounds must be positive.
    pub fn logarithmic(data: (f64, f64), pixels: (f64, f64)) -> Self {
        Self {
            log: true,
            ..Self::linear(data, pixels)
        }
    }

    fn data_ends(&self) -> (f64, f64) {
        if self.log {
            (self.data_min.log10(), self.data_max.log10())
        } else {
            (self.data_min, self.data_max)
        }
    }

    /// Convert a pixel position to a data value.
    pub fn to_data(&self, pixel: f64) -> f64 {
        let pixel_span = self.pixel_max - self.pixel_min;
        if pixel_span == 0.0 {
            return self.data_min;
        }
        let t = (pixel - self.pixel_min) / pixel_span;
        let (a, b) = self.data_ends();
        let value = a + t * (b - a);
        if self.log { 10f64.powf(value) } else { value }
    }

    /// Convert a data value to a pixel position.
    pub fn to_pixel(&self, value: f64) -> f64 {
        let (a, b) = self.data_ends();
        if b == a {
            return self.pixel_min;
        }
        let v = if self.log { value.log10() } else { value };
        let t = (v - a) / (b - a);
        self.pixel_min + t * (self.pixel_max - self.pixel_min)
    }

    /// Data width of one pixel at the given position.
    pub fn resolution(&self, pixel: f64) -> f64 {
        (self.to_data(pixel + 1.0) - self.to_data(pixel)).abs()
    }
}

/// Pair of axis mappings for a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub x: AxisMapping,
    pub y: AxisMapping,
}

impl AxisFrame {
    pub fn new(x: AxisMapping, y: AxisMapping) -> Self {
        Self { x, y }
    }

    /// Convert a device point to data coordinates.
    pub fn to_data(&self, point: Point) -> Point {
        Point::new(self.x.to_data(point.x), self.y.to_data(point.y))
    }
}

/// The component hosting the router: bounds, control region and drawing surface.
///
/// All rectangles and points exchanged through this trait are in the device frame.
pub trait GeometryProvider {
    /// Component bounds in the device frame.
    fn bounds(&self) -> Rect;

    /// Current control region.
    fn control_region(&self) -> ControlRegion;

    /// Replace the control region (called when a resize or move is committed).
    fn set_control_region(&mut self, region: ControlRegion);

    /// Whether a press at this device point may start an interaction.
    fn accept_context(&self, _point: Point) -> bool {
        true
    }

    /// Axis mappings for readout labels, if the component has any.
    fn axes(&self) -> Option<AxisFrame> {
        None
    }

    /// Overlay surface that drag feedback is painted on.
    fn surface(&mut self) -> &mut dyn Surface;

    /// Ask for a repaint of `area`, or of the whole surface when `None`.
    fn request_repaint(&mut self, area: Option<Rect>);
}

/// Convert a component-frame point to the device frame.
pub fn to_device(bounds: Rect, component: Point) -> Point {
    component + Vec2::new(bounds.x0, bounds.y0)
}

/// Convert a device-frame point to the component frame.
pub fn to_component(bounds: Rect, device: Point) -> Point {
    device - Vec2::new(bounds.x0, bounds.y0)
}
