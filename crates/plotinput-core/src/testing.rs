//! Test doubles: a recording geometry provider and a call-logging module behavior.

use crate::error::{ModuleError, ModuleResult};
use crate::events::PointEvent;
use crate::geometry::{AxisFrame, DragSpan, GeometryProvider};
use crate::input::{KeyEvent, PointerButton};
use crate::module::ModuleBehavior;
use crate::region::ControlRegion;
use crate::surface::{RecordingSurface, Surface};
use kurbo::{Point, Rect, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

/// Geometry provider backed by a [`RecordingSurface`] that remembers every repaint request.
///
/// A full repaint clears the surface, as a host redrawing the component would.
pub(crate) struct TestHost {
    pub bounds: Rect,
    pub region: ControlRegion,
    pub surface: RecordingSurface,
    pub repaints: Vec<Option<Rect>>,
    pub masked: Option<Rect>,
    pub axes: Option<AxisFrame>,
}

impl TestHost {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            region: ControlRegion::from_rect(bounds.inset(-50.0)),
            surface: RecordingSurface::new(),
            repaints: Vec::new(),
            masked: None,
            axes: None,
        }
    }

    pub fn full_repaints(&self) -> usize {
        self.repaints.iter().filter(|r| r.is_none()).count()
    }

    pub fn last_repaint(&self) -> Option<Option<Rect>> {
        self.repaints.last().copied()
    }
}

impl GeometryProvider for TestHost {
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
        !self.masked.is_some_and(|m| m.contains(point))
    }

    fn axes(&self) -> Option<AxisFrame> {
        self.axes
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn request_repaint(&mut self, area: Option<Rect>) {
        if area.is_none() {
            self.surface.clear();
        }
        self.repaints.push(area);
    }
}

pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

/// Behavior that logs `"<tag>:<callback>"` for every call and can fail one callback.
pub(crate) struct Recorder {
    tag: String,
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl Recorder {
    pub fn new(tag: &str, log: &CallLog) -> Self {
        Self {
            tag: tag.to_string(),
            log: log.clone(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, callback: &'static str) -> Self {
        self.fail_on = Some(callback);
        self
    }

    fn record(&mut self, callback: &'static str) -> ModuleResult {
        self.log.borrow_mut().push(format!("{}:{callback}", self.tag));
        if self.fail_on == Some(callback) {
            return Err(ModuleError::callback(format!("{} {callback} failed", self.tag)));
        }
        Ok(())
    }
}

impl ModuleBehavior for Recorder {
    fn pressed(&mut self, _at: Point, _button: PointerButton) -> ModuleResult {
        self.record("pressed")
    }

    fn dragged(&mut self, _span: DragSpan) -> ModuleResult {
        self.record("dragged")
    }

    fn released(&mut self, _span: DragSpan) -> ModuleResult {
        self.record("released")
    }

    fn cancelled(&mut self, _span: DragSpan) -> ModuleResult {
        self.record("cancelled")
    }

    fn point_selected(&mut self, _event: &PointEvent) -> ModuleResult {
        self.record("point")
    }

    fn wheel_moved(&mut self, _at: Point, _delta: Vec2) -> ModuleResult {
        self.record("wheel")
    }

    fn key_typed(&mut self, _key: &KeyEvent) -> ModuleResult {
        self.record("key")
    }
}
