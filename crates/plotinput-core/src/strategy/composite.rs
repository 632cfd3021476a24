//! Gesture-or-range composition.
//!
//! Short drags go to the [`GestureRecognizer`]; longer ones, and short ones whose
//! direction maps to [`Gesture::Undefined`], go to the wrapped fallback strategy.
//! While the selection modifier is held every drag goes to the fallback.

use super::{DragPolicy, DragStrategy, PaintContext, Strategy};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::SelectionEvent;
use crate::geometry::Orientation;
use crate::gesture::{Gesture, GestureConfig, GestureRecognizer};
use kurbo::Point;

#[derive(Debug, Clone)]
pub struct GestureComposite {
    recognizer: GestureRecognizer,
    fallback: Box<Strategy>,
    modifier_held: bool,
}

impl GestureComposite {
    pub fn new(fallback: Strategy) -> Self {
        Self::with_config(fallback, GestureConfig::default())
    }

    pub fn with_config(fallback: Strategy, config: GestureConfig) -> Self {
        Self {
            recognizer: GestureRecognizer::new(config),
            fallback: Box::new(fallback),
            modifier_held: false,
        }
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn fallback(&self) -> &Strategy {
        &self.fallback
    }

    /// Replace the recognizer settings, dropping any glyph bookkeeping.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.recognizer = GestureRecognizer::new(config);
    }

    /// Track the selection modifier so painting agrees with `promote`.
    pub fn set_modifier_held(&mut self, held: bool) {
        self.modifier_held = held;
    }

    /// Gesture to show for a drag, or `None` when the fallback handles it.
    fn gesture_path(&self, start: Point, end: Point) -> Option<Gesture> {
        if self.modifier_held {
            return None;
        }
        self.recognizer
            .classify(start, end)
            .filter(|g| *g != Gesture::Undefined)
    }
}

impl DragStrategy for GestureComposite {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        match self.gesture_path(start, end) {
            Some(gesture) => {
                let stale = self.fallback.clear();
                let glyph = self.recognizer.paint(ctx, start, gesture)?;
                Ok(stale.union_with(&glyph))
            }
            None => {
                let stale = self.recognizer.clear();
                let fresh = self.fallback.paint(ctx, start, end)?;
                Ok(stale.union_with(&fresh))
            }
        }
    }

    fn clear(&mut self) -> DirtyRegion {
        self.recognizer.clear().union_with(&self.fallback.clear())
    }

    fn promote(
        &self,
        start: Point,
        end: Point,
        modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>> {
        if modifier_held {
            return self.fallback.promote(start, end, true);
        }
        match self.recognizer.classify(start, end) {
            None | Some(Gesture::Undefined) => self.fallback.promote(start, end, false),
            Some(Gesture::None) => Ok(None),
            Some(_) => Ok(self.recognizer.promote(start, end)),
        }
    }

    fn policy(&self) -> DragPolicy {
        let fallback = self.fallback.policy();
        DragPolicy {
            point_callbacks: false,
            continuous_range: false,
            ..fallback
        }
    }

    fn required_orientation(&self) -> Option<Orientation> {
        self.fallback.required_orientation()
    }
}
