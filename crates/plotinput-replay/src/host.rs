//! Headless component standing in for a real plot widget.

use kurbo::{Point, Rect};
use plotinput_core::{AxisFrame, ControlRegion, GeometryProvider, RecordingSurface, Surface};

/// Geometry provider with a fixed bounds, an editable control region and a
/// recording overlay. Repaint requests are only counted.
#[derive(Debug)]
pub struct HeadlessHost {
    bounds: Rect,
    region: ControlRegion,
    axes: Option<AxisFrame>,
    surface: RecordingSurface,
    partial_repaints: usize,
    full_repaints: usize,
}

impl HeadlessHost {
    pub fn new(bounds: Rect, region: Rect) -> Self {
        Self {
            bounds,
            region: ControlRegion::from_rect(region),
            axes: None,
            surface: RecordingSurface::new(),
            partial_repaints: 0,
            full_repaints: 0,
        }
    }

    pub fn with_axes(mut self, axes: Option<AxisFrame>) -> Self {
        self.axes = axes;
        self
    }

    pub fn region(&self) -> Rect {
        self.region.to_rect()
    }

    /// Commands currently on the overlay.
    pub fn overlay(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn partial_repaints(&self) -> usize {
        self.partial_repaints
    }

    pub fn full_repaints(&self) -> usize {
        self.full_repaints
    }
}

impl GeometryProvider for HeadlessHost {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn control_region(&self) -> ControlRegion {
        self.region
    }

    fn set_control_region(&mut self, region: ControlRegion) {
        self.region = region;
    }

    fn accept_context(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    fn axes(&self) -> Option<AxisFrame> {
        self.axes
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn request_repaint(&mut self, area: Option<Rect>) {
        match area {
            Some(_) => self.partial_repaints += 1,
            None => {
                self.surface.clear();
                self.full_repaints += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_repaint_clears_overlay() {
        let mut host =
            HeadlessHost::new(Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(10.0, 10.0, 90.0, 90.0));
        host.surface()
            .fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), peniko::Color::BLACK)
            .unwrap();
        host.request_repaint(Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        assert_eq!(host.overlay().len(), 1);
        host.request_repaint(None);
        assert!(host.overlay().is_empty());
        assert_eq!((host.partial_repaints(), host.full_repaints()), (1, 1));
    }

    #[test]
    fn test_presses_outside_bounds_are_rejected() {
        let host = HeadlessHost::new(
            Rect::new(100.0, 100.0, 200.0, 200.0),
            Rect::new(120.0, 120.0, 180.0, 180.0),
        );
        assert!(host.accept_context(Point::new(150.0, 150.0)));
        assert!(!host.accept_context(Point::new(50.0, 50.0)));
    }
}
