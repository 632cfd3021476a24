//! Dirty-region tracking for incremental repaint.

use kurbo::Rect;

/// Set of rectangles affected by a paint, in the device frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirtyRegion {
    rects: Vec<Rect>,
}

impl DirtyRegion {
    /// An empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// A region holding a single rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }

    /// Add a rectangle. Non-finite rectangles are dropped.
    pub fn add(&mut self, rect: Rect) {
        let corners = [rect.x0, rect.y0, rect.x1, rect.y1];
        if corners.iter().all(|v| v.is_finite()) {
            self.rects.push(rect.abs());
        }
    }

    /// Merge another region into this one.
    pub fn union(&mut self, other: &DirtyRegion) {
        self.rects.extend_from_slice(&other.rects);
    }

    /// Builder form of [`DirtyRegion::union`].
    pub fn union_with(mut self, other: &DirtyRegion) -> Self {
        self.union(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Smallest rectangle covering every member, if any.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.rects.iter().copied().reduce(|a, b| a.union(b))
    }

    /// Take the contents, leaving this region empty.
    pub fn take(&mut self) -> DirtyRegion {
        std::mem::take(self)
    }

    /// Replace `last` with `fresh` and return everything that must be repainted:
    /// the stale area plus the new one.
    pub(crate) fn track(last: &mut DirtyRegion, fresh: DirtyRegion) -> DirtyRegion {
        let stale = std::mem::replace(last, fresh);
        stale.union_with(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_region_has_no_bounds() {
        let region = DirtyRegion::new();
        assert!(region.is_empty());
        assert!(region.bounding_box().is_none());
    }

    #[test]
    fn test_bounding_box_covers_members() {
        let mut region = DirtyRegion::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        region.add(Rect::new(50.0, 20.0, 40.0, 30.0));
        assert_eq!(region.rects().len(), 2);
        assert_eq!(region.bounding_box(), Some(Rect::new(0.0, 0.0, 50.0, 30.0)));
    }

    #[test]
    fn test_non_finite_rects_are_dropped() {
        let region = DirtyRegion::from_rect(Rect::new(f64::NAN, 0.0, 1.0, 1.0));
        assert!(region.is_empty());
    }

    #[test]
    fn test_track_returns_stale_and_fresh() {
        let mut last = DirtyRegion::from_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        let fresh = DirtyRegion::from_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        let out = DirtyRegion::track(&mut last, fresh);
        assert_eq!(out.rects().len(), 2);
        assert_eq!(last.rects(), &[Rect::new(10.0, 10.0, 20.0, 20.0)]);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut region = DirtyRegion::from_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let taken = region.take();
        assert!(region.is_empty());
        assert!(!taken.is_empty());
    }
}
