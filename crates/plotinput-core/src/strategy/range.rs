//! Single-axis range selection, as used on axes for zooming.

use super::{DragPolicy, DragStrategy, FeedbackStyle, PaintContext, ensure_finite, mark_modifier};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::{RangeEvent, SelectionEvent};
use crate::geometry::Orientation;
use kurbo::{Line, Point, Rect};

/// Two guide lines across the component with a band between them.
///
/// A horizontal range selects along x and may leave the component horizontally;
/// the promoted event carries the y position of the drag end as its reference.
#[derive(Debug, Clone)]
pub struct RangeStrategy {
    orientation: Orientation,
    continuous: bool,
    style: FeedbackStyle,
    last_dirty: DirtyRegion,
}

impl RangeStrategy {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            continuous: false,
            style: FeedbackStyle::default(),
            last_dirty: DirtyRegion::new(),
        }
    }

    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn guides(&self, bounds: Rect, start: Point, end: Point) -> [Line; 2] {
        match self.orientation {
            Orientation::Horizontal => [
                Line::new((start.x, bounds.y0), (start.x, bounds.y1)),
                Line::new((end.x, bounds.y0), (end.x, bounds.y1)),
            ],
            Orientation::Vertical => [
                Line::new((bounds.x0, start.y), (bounds.x1, start.y)),
                Line::new((bounds.x0, end.y), (bounds.x1, end.y)),
            ],
        }
    }
}

impl DragStrategy for RangeStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let b = ctx.bounds;
        let band = match self.orientation {
            Orientation::Horizontal => Rect::new(start.x, b.y0, end.x, b.y1).abs(),
            Orientation::Vertical => Rect::new(b.x0, start.y, b.x1, end.y).abs(),
        };
        ctx.surface.fill_rect(band, self.style.halo)?;
        let mut fresh = DirtyRegion::from_rect(band);
        for guide in self.guides(b, start, end) {
            fresh.add(self.style.line(ctx, guide)?);
        }
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
        let event = match self.orientation {
            Orientation::Horizontal => RangeEvent::horizontal(start.x, end.x, Some(end.y)),
            Orientation::Vertical => RangeEvent::vertical(start.y, end.y, Some(end.x)),
        };
        Ok(Some(mark_modifier(event.into(), modifier_held)))
    }

    fn policy(&self) -> DragPolicy {
        DragPolicy {
            point_callbacks: false,
            continuous_range: self.continuous,
            horizontal_overflow: self.orientation == Orientation::Horizontal,
            vertical_overflow: self.orientation == Orientation::Vertical,
        }
    }

    fn required_orientation(&self) -> Option<Orientation> {
        Some(self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RangeExtent;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_horizontal_promote_is_normalized_with_reference() {
        let event = RangeStrategy::new(Orientation::Horizontal)
            .promote(Point::new(80.0, 10.0), Point::new(20.0, 35.0), false)
            .unwrap()
            .unwrap();
        let range = event.as_range().unwrap();
        assert_eq!(range.x_range().unwrap().min(), 20.0);
        assert_eq!(range.x_range().unwrap().max(), 80.0);
        assert!(range.y_range().is_none());
        assert_eq!(range.reference(), Some(35.0));
    }

    #[test]
    fn test_vertical_promote() {
        let event = RangeStrategy::new(Orientation::Vertical)
            .promote(Point::new(5.0, 90.0), Point::new(7.0, 30.0), false)
            .unwrap()
            .unwrap();
        match event.as_range().unwrap().extent() {
            RangeExtent::Vertical { y, reference } => {
                assert_eq!((y.min(), y.max()), (30.0, 90.0));
                assert_eq!(reference, Some(7.0));
            }
            other => panic!("unexpected extent {other:?}"),
        }
    }

    #[test]
    fn test_overflow_along_own_axis_only() {
        let policy = RangeStrategy::new(Orientation::Vertical).policy();
        assert!(policy.vertical_overflow);
        assert!(!policy.horizontal_overflow);
        let strategy = RangeStrategy::new(Orientation::Vertical).with_continuous(true);
        assert!(strategy.policy().continuous_range);
    }

    #[test]
    fn test_band_spans_component() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut strategy = RangeStrategy::new(Orientation::Horizontal);
        let mut surface = RecordingSurface::new();
        let mut ctx = PaintContext::new(&mut surface, bounds, None);
        let dirty =
            strategy.paint(&mut ctx, Point::new(120.0, 40.0), Point::new(60.0, 50.0)).unwrap();
        assert!(dirty.rects().contains(&Rect::new(60.0, 0.0, 120.0, 100.0)));
        for rect in strategy.clear().rects() {
            surface.erase(*rect);
        }
        assert!(surface.is_empty());
    }
}
