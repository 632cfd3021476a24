//! Guide lines through the current point: full crosshair or a single slice.

use super::label::draw_label;
use super::{DragPolicy, DragStrategy, FeedbackStyle, PaintContext, format_value};
use crate::dirty::DirtyRegion;
use crate::error::StrategyResult;
use crate::events::SelectionEvent;
use crate::geometry::{AxisFrame, Orientation};
use kurbo::{Line, Point};

fn readout(axes: Option<&AxisFrame>, at: Point, show_x: bool, show_y: bool) -> String {
    let (x, y, rx, ry) = match axes {
        Some(frame) => {
            let data = frame.to_data(at);
            (data.x, data.y, frame.x.resolution(at.x), frame.y.resolution(at.y))
        }
        None => (at.x, at.y, 1.0, 1.0),
    };
    match (show_x, show_y) {
        (true, true) => format!("{}, {}", format_value(x, rx), format_value(y, ry)),
        (true, false) => format_value(x, rx),
        _ => format_value(y, ry),
    }
}

fn horizontal_guide(ctx: &PaintContext<'_>, at: Point) -> Line {
    Line::new((ctx.bounds.x0, at.y), (ctx.bounds.x1, at.y))
}

fn vertical_guide(ctx: &PaintContext<'_>, at: Point) -> Line {
    Line::new((at.x, ctx.bounds.y0), (at.x, ctx.bounds.y1))
}

const POINT_POLICY: DragPolicy = DragPolicy {
    point_callbacks: true,
    continuous_range: false,
    horizontal_overflow: false,
    vertical_overflow: false,
};

/// Two perpendicular guide lines through the current point, with an optional readout.
#[derive(Debug, Clone)]
pub struct CrosshairStrategy {
    style: FeedbackStyle,
    readout: bool,
    last_dirty: DirtyRegion,
}

impl Default for CrosshairStrategy {
    fn default() -> Self {
        Self {
            style: FeedbackStyle::default(),
            readout: true,
            last_dirty: DirtyRegion::new(),
        }
    }
}

impl CrosshairStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readout(mut self, readout: bool) -> Self {
        self.readout = readout;
        self
    }
}

impl DragStrategy for CrosshairStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        _start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let mut fresh = DirtyRegion::new();
        let h = horizontal_guide(ctx, end);
        let v = vertical_guide(ctx, end);
        fresh.add(self.style.line(ctx, h)?);
        fresh.add(self.style.line(ctx, v)?);
        if self.readout {
            let text = readout(ctx.axes.as_ref(), end, true, true);
            fresh.add(draw_label(ctx, &self.style, end, &text)?);
        }
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
    }

    fn clear(&mut self) -> DirtyRegion {
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
        POINT_POLICY
    }
}

/// A single guide line through the current point.
///
/// A horizontal slice is a horizontal line (constant y); a vertical slice is a vertical line.
#[derive(Debug, Clone)]
pub struct SliceStrategy {
    orientation: Orientation,
    style: FeedbackStyle,
    readout: bool,
    last_dirty: DirtyRegion,
}

impl SliceStrategy {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            style: FeedbackStyle::default(),
            readout: true,
            last_dirty: DirtyRegion::new(),
        }
    }

    pub fn with_readout(mut self, readout: bool) -> Self {
        self.readout = readout;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl DragStrategy for SliceStrategy {
    fn paint(
        &mut self,
        ctx: &mut PaintContext<'_>,
        _start: Point,
        end: Point,
    ) -> StrategyResult<DirtyRegion> {
        let line = match self.orientation {
            Orientation::Horizontal => horizontal_guide(ctx, end),
            Orientation::Vertical => vertical_guide(ctx, end),
        };
        let mut fresh = DirtyRegion::from_rect(self.style.line(ctx, line)?);
        if self.readout {
            // a horizontal line marks a y value and vice versa
            let show_x = self.orientation == Orientation::Vertical;
            let text = readout(ctx.axes.as_ref(), end, show_x, !show_x);
            fresh.add(draw_label(ctx, &self.style, end, &text)?);
        }
        Ok(DirtyRegion::track(&mut self.last_dirty, fresh))
    }

    fn clear(&mut self) -> DirtyRegion {
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
        POINT_POLICY
    }
}
