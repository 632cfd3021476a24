//! Rectangular box selection.

use super::{DragPolicy, DragStrategy, FeedbackStyle, PaintContext, ensure_finite, mark_modifier};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::{RangeEvent, SelectionEvent};
use kurbo::{Point, Rect};

/// Draws a double-stroked rectangle and promotes a box selection.
#[derive(Debug, Clone, Default)]
pub struct BoxStrategy {
    style: FeedbackStyle,
    continuous: bool,
    last_dirty: DirtyRegion,
}

impl BoxStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver range events on every motion, not only at release.
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn with_style(mut self, style: FeedbackStyle) -> Self {
        self.style = style;
        self
    }
}

impl DragStrategy for BoxStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let area = self.style.outline(ctx, Rect::from_points(start, end))?;
        Ok(DirtyRegion::track(&mut self.last_dirty, DirtyRegion::from_rect(area)))
    }

    fn clear(&mut self) -> DirtyRegion {
        self.last_dirty.take()
    }

    fn promote(
        &self,
        start: Point,
        end: Point,
        modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>> {
        ensure_finite(&[start, end])?;
        let event = RangeEvent::boxed(start, end).into();
        Ok(Some(mark_modifier(event, modifier_held)))
    }

    fn policy(&self) -> DragPolicy {
        DragPolicy {
            continuous_range: self.continuous,
            ..DragPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PlaneValue;
    use crate::strategy::MODIFIER_PLANE;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn promote_range(start: Point, end: Point) -> RangeEvent {
        let event = BoxStrategy::new().promote(start, end, false).unwrap().unwrap();
        event.as_range().unwrap().clone()
    }

    #[test]
    fn test_promote_normalized_in_all_four_directions() {
        let origin = Point::new(10.0, 10.0);
        // down-right, down-left, up-right, up-left
        for end in [
            Point::new(50.0, 40.0),
            Point::new(-30.0, 40.0),
            Point::new(50.0, -20.0),
            Point::new(-30.0, -20.0),
        ] {
            let range = promote_range(origin, end);
            let x = range.x_range().unwrap();
            let y = range.y_range().unwrap();
            assert!(x.min() <= x.max(), "x not normalized for {end:?}");
            assert!(y.min() <= y.max(), "y not normalized for {end:?}");
            assert_eq!(x.min(), origin.x.min(end.x));
            assert_eq!(y.max(), origin.y.max(end.y));
        }
    }

    #[test]
    fn test_promote_exact_values() {
        let range = promote_range(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        assert_eq!(range.x_range().unwrap().min(), 10.0);
        assert_eq!(range.x_range().unwrap().max(), 50.0);
        assert_eq!(range.y_range().unwrap().min(), 10.0);
        assert_eq!(range.y_range().unwrap().max(), 40.0);
    }

    #[test]
    fn test_modifier_plane() {
        let event = BoxStrategy::new()
            .promote(Point::ZERO, Point::new(5.0, 5.0), true)
            .unwrap()
            .unwrap();
        assert_eq!(event.as_range().unwrap().plane(MODIFIER_PLANE), Some(&PlaneValue::Flag(true)));
    }

    #[test]
    fn test_promote_rejects_nan() {
        assert!(BoxStrategy::new().promote(Point::new(f64::NAN, 0.0), Point::ZERO, false).is_err());
    }

    #[test]
    fn test_paint_draws_halo_then_stroke() {
        let mut strategy = BoxStrategy::new();
        let mut surface = RecordingSurface::new();
        let mut ctx = PaintContext::new(&mut surface, Rect::new(0.0, 0.0, 200.0, 200.0), None);
        let dirty = strategy
            .paint(&mut ctx, Point::new(10.0, 10.0), Point::new(50.0, 40.0))
            .unwrap();
        assert_eq!(dirty.bounding_box(), Some(Rect::new(7.5, 7.5, 52.5, 42.5)));

        let commands = surface.commands();
        assert_eq!(commands.len(), 2);
        match (&commands[0], &commands[1]) {
            (
                DrawCommand::StrokeRect { style: halo, .. },
                DrawCommand::StrokeRect { style: stroke, .. },
            ) => {
                assert!(halo.width > stroke.width);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_clear_after_paint_leaves_nothing() {
        let mut strategy = BoxStrategy::new();
        let mut surface = RecordingSurface::new();
        let mut ctx = PaintContext::new(&mut surface, Rect::new(0.0, 0.0, 200.0, 200.0), None);
        strategy.paint(&mut ctx, Point::new(10.0, 10.0), Point::new(50.0, 40.0)).unwrap();
        strategy.paint(&mut ctx, Point::new(10.0, 10.0), Point::new(60.0, 50.0)).unwrap();

        let cleared = strategy.clear();
        assert_eq!(cleared.rects().len(), 1);
        for rect in cleared.rects() {
            surface.erase(*rect);
        }
        assert!(surface.is_empty());
        assert!(strategy.clear().is_empty());
    }

    #[test]
    fn test_continuous_flag() {
        assert!(!BoxStrategy::new().policy().continuous_range);
        assert!(BoxStrategy::new().with_continuous(true).policy().continuous_range);
    }
}
