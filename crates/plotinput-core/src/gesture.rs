//! Gesture recognition for short drags.
//!
//! A drag shorter than the gesture radius is classified by direction into one of
//! four configured gestures; anything longer is a range drag.
//!
//! Conventions:
//! - `radius < radius_threshold` is a gesture, `radius >= radius_threshold` is a range.
//! - Angles are in degrees, screen y flipped so "up" is positive.
//! - Quadrants are half-open: right `[-45, 45)`, up `[45, 135)`,
//!   down `[-135, -45)`, left is everything else (`[135, 180]` and `[-180, -135)`).
//! - A zero-length drag has no direction and classifies as [`Gesture::None`].

use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::{GestureEvent, SelectionEvent};
use crate::strategy::{FeedbackStyle, PaintContext};
use crate::surface::StrokeStyle;
use kurbo::{Line, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Drags shorter than this (device units) are gestures.
pub const GESTURE_RADIUS: f64 = 20.0;
/// Side of the square glyph drawn at the gesture origin.
pub const GLYPH_SIZE: f64 = 24.0;

/// Named gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    None,
    Back,
    Forward,
    ZoomOut,
    ScanNext,
    ScanPrev,
    Undefined,
}

impl Gesture {
    /// Whether the gesture names an action (not `None` or `Undefined`).
    pub fn is_actionable(self) -> bool {
        !matches!(self, Gesture::None | Gesture::Undefined)
    }
}

/// Cardinal direction of a short drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    /// Direction for an angle in degrees (any range; wrapped into [-180, 180)).
    /// Returns `None` for NaN.
    pub fn from_angle(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let a = (degrees + 180.0).rem_euclid(360.0) - 180.0;
        let direction = if (-45.0..45.0).contains(&a) {
            Direction::Right
        } else if (45.0..135.0).contains(&a) {
            Direction::Up
        } else if (-135.0..-45.0).contains(&a) {
            Direction::Down
        } else {
            Direction::Left
        };
        Some(direction)
    }
}

/// Which gesture each direction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureMap {
    pub right: Gesture,
    pub up: Gesture,
    pub left: Gesture,
    pub down: Gesture,
}

impl Default for GestureMap {
    fn default() -> Self {
        Self {
            right: Gesture::Forward,
            up: Gesture::ZoomOut,
            left: Gesture::Back,
            down: Gesture::Undefined,
        }
    }
}

impl GestureMap {
    pub fn lookup(&self, direction: Direction) -> Gesture {
        match direction {
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
        }
    }
}

/// Recognizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub radius: f64,
    pub map: GestureMap,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            radius: GESTURE_RADIUS,
            map: GestureMap::default(),
        }
    }
}

/// Polar form of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragVector {
    pub dx: f64,
    /// Vertical delta with "up" positive.
    pub dy: f64,
    pub radius: f64,
    /// Angle in degrees, in [-180, 180].
    pub angle: f64,
}

impl DragVector {
    pub fn between(origin: Point, current: Point) -> Self {
        let dx = current.x - origin.x;
        let dy = -(current.y - origin.y);
        Self {
            dx,
            dy,
            radius: dx.hypot(dy),
            angle: dy.atan2(dx).to_degrees(),
        }
    }
}

/// Classifies short drags into gestures and draws the recognized glyph.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    style: FeedbackStyle,
    last_dirty: DirtyRegion,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            style: FeedbackStyle::default(),
            last_dirty: DirtyRegion::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Classify a drag.
    ///
    /// Returns `None` when the drag is long enough to be a range selection.
    /// Non-finite geometry cannot be classified and yields `Some(Undefined)`.
    pub fn classify(&self, origin: Point, current: Point) -> Option<Gesture> {
        let v = DragVector::between(origin, current);
        if v.radius.is_nan() {
            return Some(Gesture::Undefined);
        }
        if v.radius >= self.config.radius {
            return None;
        }
        if v.radius == 0.0 {
            return Some(Gesture::None);
        }
        Some(self.classify_angle(v.angle))
    }

    /// Gesture for a drag direction given in degrees.
    pub fn classify_angle(&self, degrees: f64) -> Gesture {
        match Direction::from_angle(degrees) {
            Some(direction) => self.config.map.lookup(direction),
            None => Gesture::Undefined,
        }
    }

    /// Gesture event for a drag, if it is a short drag naming an action.
    pub fn promote(&self, origin: Point, current: Point) -> Option<SelectionEvent> {
        match self.classify(origin, current) {
            Some(gesture) if gesture.is_actionable() => {
                Some(GestureEvent::new(gesture, origin).into())
            }
            _ => None,
        }
    }

    /// Area covered by the glyph at `origin`.
    pub fn glyph_bounds(origin: Point) -> Rect {
        Rect::from_center_size(origin, Size::new(GLYPH_SIZE, GLYPH_SIZE))
    }

    /// Draw the glyph for `gesture` at `origin`.
    ///
    /// Returns the previous glyph area plus the new one. `Gesture::None` draws nothing.
    pub fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        origin: Point,
        gesture: Gesture,
    ) -> StrategyResult<DirtyRegion> {
        let fresh = if gesture == Gesture::None {
            DirtyRegion::new()
        } else {
            draw_glyph(ctx, &self.style, origin, gesture)?;
            DirtyRegion::from_rect(Self::glyph_bounds(origin))
        };
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
    }

    /// Forget the last glyph and return its area.
    pub fn clear(&mut self) -> DirtyRegion {
        self.last_dirty.take()
    }
}

fn arrow(
    ctx: &mut PaintContext<'_>,
    stroke: &StrokeStyle,
    origin: Point,
    dir: Vec2,
    heads: usize,
) -> StrategyResult<()> {
    let reach = GLYPH_SIZE / 2.0 - 3.0;
    let tail = origin - dir * reach;
    let tip = origin + dir * reach;
    ctx.surface.stroke_line(Line::new(tail, tip), stroke)?;
    let normal = Vec2::new(-dir.y, dir.x);
    for i in 0..heads {
        let at = tip - dir * (4.0 * i as f64);
        ctx.surface.stroke_line(Line::new(at, at - dir * 5.0 + normal * 4.0), stroke)?;
        ctx.surface.stroke_line(Line::new(at, at - dir * 5.0 - normal * 4.0), stroke)?;
    }
    Ok(())
}

fn draw_glyph(
    ctx: &mut PaintContext<'_>,
    style: &FeedbackStyle,
    origin: Point,
    gesture: Gesture,
) -> StrategyResult<()> {
    let frame = GestureRecognizer::glyph_bounds(origin);
    ctx.surface.fill_rect(frame, style.halo)?;
    let stroke = StrokeStyle::solid(style.stroke, style.width);
    match gesture {
        Gesture::Forward => arrow(ctx, &stroke, origin, Vec2::new(1.0, 0.0), 1),
        Gesture::Back => arrow(ctx, &stroke, origin, Vec2::new(-1.0, 0.0), 1),
        Gesture::ScanNext => arrow(ctx, &stroke, origin, Vec2::new(1.0, 0.0), 2),
        Gesture::ScanPrev => arrow(ctx, &stroke, origin, Vec2::new(-1.0, 0.0), 2),
        Gesture::ZoomOut => {
            let inner = frame.inset(-5.0);
            ctx.surface.stroke_rect(inner, &stroke)?;
            let bar = Line::new((inner.x0 + 3.0, origin.y), (inner.x1 - 3.0, origin.y));
            ctx.surface.stroke_line(bar, &stroke)?;
            Ok(())
        }
        Gesture::Undefined => {
            ctx.surface.draw_text(frame.origin() + Vec2::new(8.0, 5.0), "?", style.text)?;
            Ok(())
        }
        Gesture::None => Ok(()),
    }
}
