//! Measuring annotations: a segment with a live Δx/Δy label.
//!
//! Values are in data units when the component has an axis frame, otherwise in
//! device pixels with y flipped so that "up" is positive.

use super::label::draw_label;
use super::{DragPolicy, DragStrategy, FeedbackStyle, PaintContext, format_value};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::SelectionEvent;
use crate::geometry::AxisFrame;
use kurbo::{Line, Point};

/// Deltas between two points and the resolution of each.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Deltas {
    dx: f64,
    dy: f64,
    rx: f64,
    ry: f64,
}

impl Deltas {
    fn measure(axes: Option<&AxisFrame>, start: Point, end: Point) -> Self {
        match axes {
            Some(frame) => {
                let a = frame.to_data(start);
                let b = frame.to_data(end);
                Self {
                    dx: b.x - a.x,
                    dy: b.y - a.y,
                    rx: frame.x.resolution(end.x),
                    ry: frame.y.resolution(end.y),
                }
            }
            None => Self {
                dx: end.x - start.x,
                dy: start.y - end.y,
                rx: 1.0,
                ry: 1.0,
            },
        }
    }

    fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Resolution of the magnitude, propagated from the per-axis resolutions.
    fn magnitude_resolution(&self) -> f64 {
        let d = self.magnitude();
        if d > 0.0 {
            (self.dx * self.rx).hypot(self.dy * self.ry) / d
        } else {
            self.rx.max(self.ry)
        }
    }
}

fn paint_annotation(
    ctx: &mut PaintContext<'_>,
    style: &FeedbackStyle,
    start: Point,
    end: Point,
    text: &str,
) -> StrategyResult<DirtyRegion> {
    let mut fresh = DirtyRegion::from_rect(style.line(ctx, Line::new(start, end))?);
    fresh.add(draw_label(ctx, style, end, text)?);
    Ok(fresh)
}

/// Segment labelled with Δx, Δy and its length.
#[derive(Debug, Clone, Default)]
pub struct LengthStrategy {
    style: FeedbackStyle,
    label: Option<String>,
    last_dirty: DirtyRegion,
}

impl LengthStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn label_text(axes: Option<&AxisFrame>, start: Point, end: Point) -> String {
        let d = Deltas::measure(axes, start, end);
        format!(
            "Δx {}  Δy {}  |d| {}",
            format_value(d.dx, d.rx),
            format_value(d.dy, d.ry),
            format_value(d.magnitude(), d.magnitude_resolution())
        )
    }
}

impl DragStrategy for LengthStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let text = Self::label_text(ctx.axes.as_ref(), start, end);
        let fresh = paint_annotation(ctx, &self.style, start, end, &text)?;
        self.label = Some(text);
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
    }

    fn clear(&mut self) -> DirtyRegion {
        self.label = None;
        self.last_dirty.take()
    }

    fn promote(
        &self,
        _start: Point,
        _end: Point,
        _modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>> {
        Ok(None)
    }

    fn policy(&self) -> DragPolicy {
        DragPolicy::default()
    }
}

/// Segment labelled with Δx, Δy and its slope.
#[derive(Debug, Clone, Default)]
pub struct PointSlopeStrategy {
    style: FeedbackStyle,
    label: Option<String>,
    last_dirty: DirtyRegion,
}

const SLOPE_RESOLUTION: f64 = 0.001;

impl PointSlopeStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn label_text(axes: Option<&AxisFrame>, start: Point, end: Point) -> String {
        let d = Deltas::measure(axes, start, end);
        let slope = if d.dx == 0.0 {
            "∞".to_string()
        } else {
            format_value(d.dy / d.dx, SLOPE_RESOLUTION)
        };
        format!(
            "Δx {}  Δy {}  m {}",
            format_value(d.dx, d.rx),
            format_value(d.dy, d.ry),
            slope
        )
    }
}

impl DragStrategy for PointSlopeStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let text = Self::label_text(ctx.axes.as_ref(), start, end);
        let fresh = paint_annotation(ctx, &self.style, start, end, &text)?;
        self.label = Some(text);
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
    }

    fn clear(&mut self) -> DirtyRegion {
        self.label = None;
        self.last_dirty.take()
    }

    fn promote(
        &self,
        _start: Point,
        _end: Point,
        _modifier_held: bool,
    ) -> StrategyResult<Option<SelectionEvent>> {
        Ok(None)
    }

    fn policy(&self) -> DragPolicy {
        DragPolicy::default()
    }
}
