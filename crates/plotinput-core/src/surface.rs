//! Drawing surface abstraction for drag feedback.
//!
//! Strategies draw through [`Surface`] and report what they touched as a
//! [`DirtyRegion`](crate::dirty::DirtyRegion); they never trigger repaints themselves.

use crate::error::{SurfaceError, SurfaceResult};
use kurbo::{Line, Point, Rect, Size};
use peniko::Color;

/// Stroke parameters for feedback lines and outlines.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    /// A dashed stroke.
    pub fn dashed(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// Trait for overlay drawing backends.
pub trait Surface {
    /// Stroke a line segment.
    fn stroke_line(&mut self, line: Line, style: &StrokeStyle) -> SurfaceResult<()>;

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> SurfaceResult<()>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> SurfaceResult<()>;

    /// Draw text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> SurfaceResult<()>;

    /// Size the given text would occupy.
    fn measure_text(&self, text: &str) -> Size;
}

/// A recorded drawing command.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Line { line: Line, style: StrokeStyle },
    StrokeRect { rect: Rect, style: StrokeStyle },
    FillRect { rect: Rect, color: Color },
    Text { origin: Point, text: String, color: Color, extent: Size },
}

impl DrawCommand {
    /// Area covered by the command.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Line { line, style } => {
                let half = style.width / 2.0;
                Rect::from_points(line.p0, line.p1).inflate(half, half)
            }
            DrawCommand::StrokeRect { rect, style } => {
                let half = style.width / 2.0;
                rect.inflate(half, half)
            }
            DrawCommand::FillRect { rect, .. } => *rect,
            DrawCommand::Text { origin, extent, .. } => Rect::from_origin_size(*origin, *extent),
        }
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// In-memory surface that records a display list.
///
/// Text metrics are fixed-width so layouts are deterministic.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    failure: Option<String>,
    /// Advance per character, in device pixels.
    pub char_width: f64,
    /// Height of one text line, in device pixels.
    pub line_height: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            failure: None,
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose draw calls all fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Make subsequent draw calls fail (or succeed again with `None`).
    pub fn set_failure(&mut self, message: Option<String>) {
        self.failure = message;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every command touching `area` and return how many were removed.
    pub fn erase(&mut self, area: Rect) -> usize {
        let before = self.commands.len();
        self.commands.retain(|cmd| !overlaps(cmd.bounds(), area));
        before - self.commands.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn record(&mut self, command: DrawCommand) -> SurfaceResult<()> {
        if let Some(message) = &self.failure {
            return Err(SurfaceError::Draw(message.clone()));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn stroke_line(&mut self, line: Line, style: &StrokeStyle) -> SurfaceResult<()> {
        self.record(DrawCommand::Line { line, style: *style })
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> SurfaceResult<()> {
        self.record(DrawCommand::StrokeRect { rect, style: *style })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> SurfaceResult<()> {
        self.record(DrawCommand::FillRect { rect, color })
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> SurfaceResult<()> {
        let extent = self.measure_text(text);
        self.record(DrawCommand::Text {
            origin,
            text: text.to_string(),
            color,
            extent,
        })
    }

    fn measure_text(&self, text: &str) -> Size {
        Size::new(text.chars().count() as f64 * self.char_width, self.line_height)
    }
}
