//! Direction indicator: a segment with its angle, promoted as the segment's bounding box.

use super::label::draw_label;
use super::{DragPolicy, DragStrategy, FeedbackStyle, PaintContext, ensure_finite, mark_modifier};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::{RangeEvent, SelectionEvent};
use kurbo::{Line, Point, Rect};

#[derive(Debug, Clone, Default)]
pub struct AngleStrategy {
    style: FeedbackStyle,
    last_dirty: DirtyRegion,
}

impl AngleStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen angle of the segment in degrees, "up" positive, in (-180, 180].
    pub fn angle_degrees(start: Point, end: Point) -> f64 {
        (start.y - end.y).atan2(end.x - start.x).to_degrees()
    }
}

impl DragStrategy for AngleStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let mut fresh = DirtyRegion::from_rect(self.style.line(ctx, Line::new(start, end))?);
        let text = format!("{:.1}°", Self::angle_degrees(start, end));
        fresh.add(draw_label(ctx, &self.style, end, &text)?);
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
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
        let event = RangeEvent::from_rect(Rect::from_points(start, end)).into();
        Ok(Some(mark_modifier(event, modifier_held)))
    }

    fn policy(&self) -> DragPolicy {
        DragPolicy::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn test_angle_degrees() {
        let o = Point::new(10.0, 10.0);
        let close = |end: Point, expected: f64| {
            (AngleStrategy::angle_degrees(o, end) - expected).abs() < 1e-9
        };
        assert!(close(Point::new(20.0, 10.0), 0.0));
        assert!(close(Point::new(10.0, 0.0), 90.0));
        assert!(close(Point::new(0.0, 10.0), 180.0));
        assert!(close(Point::new(10.0, 20.0), -90.0));
    }

    #[test]
    fn test_promotes_bounding_box() {
        let event = AngleStrategy::new()
            .promote(Point::new(80.0, 20.0), Point::new(30.0, 70.0), false)
            .unwrap()
            .unwrap();
        let range = event.as_range().unwrap();
        assert_eq!(range.x_range().unwrap().min(), 30.0);
        assert_eq!(range.x_range().unwrap().max(), 80.0);
        assert_eq!(range.y_range().unwrap().min(), 20.0);
        assert_eq!(range.y_range().unwrap().max(), 70.0);
        assert!(range.planes().is_empty());
    }

    #[test]
    fn test_paint_labels_angle() {
        let mut strategy = AngleStrategy::new();
        let mut surface = RecordingSurface::new();
        let mut ctx = PaintContext::new(&mut surface, Rect::new(0.0, 0.0, 200.0, 200.0), None);
        strategy.paint(&mut ctx, Point::new(50.0, 100.0), Point::new(100.0, 50.0)).unwrap();
        let label = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(label.as_deref(), Some("45.0°"));
    }
}
