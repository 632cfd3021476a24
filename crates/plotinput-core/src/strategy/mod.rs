//! Drag strategies: live feedback plus promotion of a drag into a domain event.
//!
//! Every strategy paints between two device points, reports the area it touched,
//! and converts the same two points into an event. Strategies never repaint on
//! their own; the router owns the dirty-region bookkeeping for a session.

mod angle;
mod annotate;
mod box_select;
mod composite;
mod crosshair;
mod label;
mod range;

pub use angle::AngleStrategy;
pub use annotate::{LengthStrategy, PointSlopeStrategy};
pub use box_select::BoxStrategy;
pub use composite::GestureComposite;
pub use crosshair::{CrosshairStrategy, SliceStrategy};
pub use label::{format_value, place_label, LABEL_OFFSET};
pub use range::RangeStrategy;

use crate::dirty::DirtyRegion;
use crate::error::{StrategyError, StrategyResult};
use crate::events::{PlaneValue, SelectionEvent};
use crate::geometry::{AxisFrame, Orientation};
use crate::gesture::GestureConfig;
use crate::module::Cursor;
use crate::surface::{StrokeStyle, Surface};
use kurbo::{Line, Point, Rect};
use peniko::Color;

/// Plane attached to events promoted while the selection modifier was held.
pub const MODIFIER_PLANE: &str = "modifier";

/// Callback timing and bounds policy of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragPolicy {
    /// Point-selected callback on every motion.
    pub point_callbacks: bool,
    /// Promote and deliver a range event on every motion, not only at release.
    pub continuous_range: bool,
    /// The drag may leave the component horizontally.
    pub horizontal_overflow: bool,
    /// The drag may leave the component vertically.
    pub vertical_overflow: bool,
}

impl DragPolicy {
    /// Clamp `point` to `bounds` on every axis that does not allow overflow.
    pub fn clamp(&self, point: Point, bounds: Rect) -> Point {
        let mut p = point;
        if !self.horizontal_overflow {
            p.x = p.x.clamp(bounds.x0, bounds.x1);
        }
        if !self.vertical_overflow {
            p.y = p.y.clamp(bounds.y0, bounds.y1);
        }
        p
    }
}

/// Colors and width for drag feedback.
///
/// Feedback is drawn twice: a wide translucent halo, then a thin opaque stroke on top.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackStyle {
    pub stroke: Color,
    pub halo: Color,
    pub text: Color,
    pub width: f64,
    pub halo_width: f64,
}

impl Default for FeedbackStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_rgba8(30, 30, 30, 255),
            halo: Color::from_rgba8(255, 255, 255, 160),
            text: Color::from_rgba8(20, 20, 20, 255),
            width: 1.0,
            halo_width: 3.0,
        }
    }
}

impl FeedbackStyle {
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::solid(self.stroke, self.width)
    }

    pub fn halo_style(&self) -> StrokeStyle {
        StrokeStyle::solid(self.halo, self.halo_width)
    }

    /// Margin around painted geometry that the halo can reach.
    pub fn margin(&self) -> f64 {
        self.halo_width.max(self.width) / 2.0 + 1.0
    }

    /// Halo-then-stroke a line and return its dirty rectangle.
    pub(crate) fn line(&self, ctx: &mut PaintContext<'_>, line: Line) -> StrategyResult<Rect> {
        ctx.surface.stroke_line(line, &self.halo_style())?;
        ctx.surface.stroke_line(line, &self.stroke_style())?;
        let m = self.margin();
        Ok(Rect::from_points(line.p0, line.p1).inflate(m, m))
    }

    /// Halo-then-stroke a rectangle outline and return its dirty rectangle.
    pub(crate) fn outline(&self, ctx: &mut PaintContext<'_>, rect: Rect) -> StrategyResult<Rect> {
        ctx.surface.stroke_rect(rect, &self.halo_style())?;
        ctx.surface.stroke_rect(rect, &self.stroke_style())?;
        let m = self.margin();
        Ok(rect.inflate(m, m))
    }
}

/// What a strategy paints on, plus the component it is painting over.
pub struct PaintContext<'a> {
    pub surface: &'a mut dyn Surface,
    /// Component bounds, device frame.
    pub bounds: Rect,
    pub axes: Option<AxisFrame>,
}

impl<'a> PaintContext<'a> {
    pub fn new(surface: &'a mut dyn Surface, bounds: Rect, axes: Option<AxisFrame>) -> Self {
        Self { surface, bounds, axes }
    }
}

/// Common interface for all strategies.
pub trait DragStrategy {
    /// Draw feedback for a drag from `start` to `end`.
    ///
    /// Returns everything that must be repainted: the area of the previous paint
    /// (now stale) and the area of this one. Safe to call on every motion tick.
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion>;

    /// Forget the last paint and return the area it covered.
    fn clear(&mut self) -> DirtyRegion;

    /// Convert a drag into an event, or `None` if this strategy produces none.
    fn promote(
        &self,
        start: Point,
        end: Point,
        modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>>;

    /// Callback timing and overflow policy.
    fn policy(&self) -> DragPolicy;

    /// Axis orientation the strategy must be bound to, if any.
    fn required_orientation(&self) -> Option<Orientation> {
        None
    }

    fn wants_point_callbacks(&self) -> bool {
        self.policy().point_callbacks
    }

    fn wants_continuous_range_callbacks(&self) -> bool {
        self.policy().continuous_range
    }

    fn allows_horizontal_overflow(&self) -> bool {
        self.policy().horizontal_overflow
    }

    fn allows_vertical_overflow(&self) -> bool {
        self.policy().vertical_overflow
    }
}

/// The closed set of strategies.
#[derive(Debug, Clone)]
pub enum Strategy {
    BoxSelect(BoxStrategy),
    Crosshair(CrosshairStrategy),
    Slice(SliceStrategy),
    Length(LengthStrategy),
    PointSlope(PointSlopeStrategy),
    Angle(AngleStrategy),
    Range(RangeStrategy),
    GestureComposite(GestureComposite),
}

impl Strategy {
    pub fn boxed() -> Self {
        Strategy::BoxSelect(BoxStrategy::new())
    }

    pub fn crosshair() -> Self {
        Strategy::Crosshair(CrosshairStrategy::new())
    }

    pub fn slice(orientation: Orientation) -> Self {
        Strategy::Slice(SliceStrategy::new(orientation))
    }

    pub fn length() -> Self {
        Strategy::Length(LengthStrategy::new())
    }

    pub fn point_slope() -> Self {
        Strategy::PointSlope(PointSlopeStrategy::new())
    }

    pub fn angle() -> Self {
        Strategy::Angle(AngleStrategy::new())
    }

    pub fn range(orientation: Orientation) -> Self {
        Strategy::Range(RangeStrategy::new(orientation))
    }

    pub fn gesture_or_box() -> Self {
        Strategy::GestureComposite(GestureComposite::new(Strategy::boxed()))
    }

    pub fn gesture_or_range(orientation: Orientation) -> Self {
        Strategy::GestureComposite(GestureComposite::new(Strategy::range(orientation)))
    }

    /// Short name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BoxSelect(_) => "box",
            Strategy::Crosshair(_) => "crosshair",
            Strategy::Slice(_) => "slice",
            Strategy::Length(_) => "length",
            Strategy::PointSlope(_) => "point_slope",
            Strategy::Angle(_) => "angle",
            Strategy::Range(_) => "range",
            Strategy::GestureComposite(_) => "gesture_composite",
        }
    }

    /// Apply recognizer settings. Only the gesture composite has a recognizer.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        if let Strategy::GestureComposite(s) = self {
            s.set_gesture_config(config);
        }
    }

    /// Tell strategies that paint per modifier whether the selection modifier is held.
    pub fn set_modifier_held(&mut self, held: bool) {
        if let Strategy::GestureComposite(s) = self {
            s.set_modifier_held(held);
        }
    }

    /// Cursor a module shows when it does not pick its own.
    pub fn default_cursor(&self) -> Cursor {
        match self {
            Strategy::Crosshair(_) | Strategy::Slice(_) => Cursor::Crosshair,
            _ => Cursor::Default,
        }
    }
}

impl DragStrategy for Strategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        match self {
            Strategy::BoxSelect(s) => s.paint(ctx, start, end),
            Strategy::Crosshair(s) => s.paint(ctx, start, end),
            Strategy::Slice(s) => s.paint(ctx, start, end),
            Strategy::Length(s) => s.paint(ctx, start, end),
            Strategy::PointSlope(s) => s.paint(ctx, start, end),
            Strategy::Angle(s) => s.paint(ctx, start, end),
            Strategy::Range(s) => s.paint(ctx, start, end),
            Strategy::GestureComposite(s) => s.paint(ctx, start, end),
        }
    }

    fn clear(&mut self) -> DirtyRegion {
        match self {
            Strategy::BoxSelect(s) => s.clear(),
            Strategy::Crosshair(s) => s.clear(),
            Strategy::Slice(s) => s.clear(),
            Strategy::Length(s) => s.clear(),
            Strategy::PointSlope(s) => s.clear(),
            Strategy::Angle(s) => s.clear(),
            Strategy::Range(s) => s.clear(),
            Strategy::GestureComposite(s) => s.clear(),
        }
    }

    fn promote(
        &self,
        start: Point,
        end: Point,
        modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>> {
        match self {
            Strategy::BoxSelect(s) => s.promote(start, end, modifier_held),
            Strategy::Crosshair(s) => s.promote(start, end, modifier_held),
            Strategy::Slice(s) => s.promote(start, end, modifier_held),
            Strategy::Length(s) => s.promote(start, end, modifier_held),
            Strategy::PointSlope(s) => s.promote(start, end, modifier_held),
            Strategy::Angle(s) => s.promote(start, end, modifier_held),
            Strategy::Range(s) => s.promote(start, end, modifier_held),
            Strategy::GestureComposite(s) => s.promote(start, end, modifier_held),
        }
    }

    fn policy(&self) -> DragPolicy {
        match self {
            Strategy::BoxSelect(s) => s.policy(),
            Strategy::Crosshair(s) => s.policy(),
            Strategy::Slice(s) => s.policy(),
            Strategy::Length(s) => s.policy(),
            Strategy::PointSlope(s) => s.policy(),
            Strategy::Angle(s) => s.policy(),
            Strategy::Range(s) => s.policy(),
            Strategy::GestureComposite(s) => s.policy(),
        }
    }

    fn required_orientation(&self) -> Option<Orientation> {
        match self {
            Strategy::Range(s) => s.required_orientation(),
            Strategy::GestureComposite(s) => s.required_orientation(),
            _ => None,
        }
    }
}

/// Reject NaN/infinite drag points before promoting them.
pub(crate) fn ensure_finite(points: &[Point]) -> StrategyResult<()> {
    match points.iter().find(|p| !p.is_finite()) {
        Some(p) => Err(StrategyError::NonFinite { x: p.x, y: p.y }),
        None => Ok(()),
    }
}

/// Attach the modifier plane when the selection modifier was held.
pub(crate) fn mark_modifier(event: SelectionEvent, modifier_held: bool) -> SelectionEvent {
    if modifier_held {
        event.with_plane(MODIFIER_PLANE, PlaneValue::Flag(true))
    } else {
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_clamp_respects_overflow() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let strict = DragPolicy::default();
        assert_eq!(strict.clamp(Point::new(150.0, -20.0), bounds), Point::new(100.0, 0.0));

        let horizontal = DragPolicy {
            horizontal_overflow: true,
            ..DragPolicy::default()
        };
        assert_eq!(horizontal.clamp(Point::new(150.0, -20.0), bounds), Point::new(150.0, 0.0));
    }

    #[test]
    fn test_policy_flags_per_variant() {
        assert!(Strategy::crosshair().wants_point_callbacks());
        assert!(!Strategy::crosshair().wants_continuous_range_callbacks());
        assert!(!Strategy::boxed().wants_point_callbacks());
        assert!(Strategy::range(Orientation::Horizontal).allows_horizontal_overflow());
        assert!(!Strategy::range(Orientation::Horizontal).allows_vertical_overflow());
    }

    #[test]
    fn test_required_orientation() {
        assert_eq!(Strategy::boxed().required_orientation(), None);
        assert_eq!(
            Strategy::range(Orientation::Vertical).required_orientation(),
            Some(Orientation::Vertical)
        );
        assert_eq!(
            Strategy::gesture_or_range(Orientation::Horizontal).required_orientation(),
            Some(Orientation::Horizontal)
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(&[Point::new(1.0, 2.0)]).is_ok());
        assert!(matches!(
            ensure_finite(&[Point::ZERO, Point::new(f64::INFINITY, 0.0)]),
            Err(StrategyError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_names_and_cursors() {
        assert_eq!(Strategy::gesture_or_box().name(), "gesture_composite");
        assert_eq!(Strategy::slice(Orientation::Vertical).default_cursor(), Cursor::Crosshair);
        assert_eq!(Strategy::boxed().default_cursor(), Cursor::Default);
    }
}
