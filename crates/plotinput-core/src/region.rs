//! Control region and its resize/move hot zones.

use crate::geometry::Span;
use crate::module::Cursor;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Width of the resize band straddling each edge, in device pixels.
pub const EDGE_BAND: f64 = 10.0;
/// Half-size of the square move zone around the region center, in device pixels.
pub const MOVE_ZONE: f64 = 16.0;

/// The resizable/movable rectangle of a component (e.g. a plot's layout cell).
///
/// `row` is the vertical extent and `column` the horizontal extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlRegion {
    pub row: Span,
    pub column: Span,
}

impl ControlRegion {
    pub fn new(row: Span, column: Span) -> Self {
        Self { row, column }
    }

    /// Build a region from a device rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            row: Span::new(rect.y0, rect.y1),
            column: Span::new(rect.x0, rect.x1),
        }
    }

    /// The region as a device rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.column.min(), self.row.min(), self.column.max(), self.row.max())
    }

    /// The region translated by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::from_rect(self.to_rect() + delta)
    }
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// What part of the control region the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionHandle {
    /// One edge band: resizes a single edge.
    Edge(Edge),
    /// Two overlapping edge bands: resizes both edges.
    Corner(Corner),
    /// Center hot zone: moves the region.
    Center,
}

impl RegionHandle {
    /// Whether this handle moves rather than resizes.
    pub fn is_move(self) -> bool {
        matches!(self, RegionHandle::Center)
    }

    /// Hover cursor for this handle.
    pub fn cursor(self) -> Cursor {
        match self {
            RegionHandle::Edge(Edge::Top) => Cursor::ResizeN,
            RegionHandle::Edge(Edge::Bottom) => Cursor::ResizeS,
            RegionHandle::Edge(Edge::Left) => Cursor::ResizeW,
            RegionHandle::Edge(Edge::Right) => Cursor::ResizeE,
            RegionHandle::Corner(Corner::TopLeft) => Cursor::ResizeNW,
            RegionHandle::Corner(Corner::TopRight) => Cursor::ResizeNE,
            RegionHandle::Corner(Corner::BottomLeft) => Cursor::ResizeSW,
            RegionHandle::Corner(Corner::BottomRight) => Cursor::ResizeSE,
            RegionHandle::Center => Cursor::Move,
        }
    }
}

/// Find the handle under `point`.
///
/// Edge bands are `band` wide, centered on the edge. Corners take priority over
/// edges, and edges over the center zone.
pub fn hit_test_region(
    region: Rect,
    point: Point,
    band: f64,
    move_zone: f64,
) -> Option<RegionHandle> {
    let half = band / 2.0;
    if !region.inflate(half, half).contains(point) {
        return None;
    }

    let near_left = (point.x - region.x0).abs() <= half;
    let near_right = !near_left && (point.x - region.x1).abs() <= half;
    let near_top = (point.y - region.y0).abs() <= half;
    let near_bottom = !near_top && (point.y - region.y1).abs() <= half;

    let handle = match (near_top, near_bottom, near_left, near_right) {
        (true, _, true, _) => RegionHandle::Corner(Corner::TopLeft),
        (true, _, _, true) => RegionHandle::Corner(Corner::TopRight),
        (_, true, true, _) => RegionHandle::Corner(Corner::BottomLeft),
        (_, true, _, true) => RegionHandle::Corner(Corner::BottomRight),
        (true, _, _, _) => RegionHandle::Edge(Edge::Top),
        (_, true, _, _) => RegionHandle::Edge(Edge::Bottom),
        (_, _, true, _) => RegionHandle::Edge(Edge::Left),
        (_, _, _, true) => RegionHandle::Edge(Edge::Right),
        _ => {
            let center = region.center();
            if (point.x - center.x).abs() <= move_zone && (point.y - center.y).abs() <= move_zone {
                RegionHandle::Center
            } else {
                return None;
            }
        }
    };
    Some(handle)
}

/// Apply a drag of `delta` on `handle` to `rect`.
///
/// The result is normalized, so dragging an edge past its opposite edge flips the rectangle.
pub fn apply_handle(rect: Rect, handle: RegionHandle, delta: Vec2) -> Rect {
    let mut r = rect;
    match handle {
        RegionHandle::Center => return rect + delta,
        RegionHandle::Edge(edge) => match edge {
            Edge::Top => r.y0 += delta.y,
            Edge::Bottom => r.y1 += delta.y,
            Edge::Left => r.x0 += delta.x,
            Edge::Right => r.x1 += delta.x,
        },
        RegionHandle::Corner(corner) => match corner {
            Corner::TopLeft => {
                r.x0 += delta.x;
                r.y0 += delta.y;
            }
            Corner::TopRight => {
                r.x1 += delta.x;
                r.y0 += delta.y;
            }
            Corner::BottomLeft => {
                r.x0 += delta.x;
                r.y1 += delta.y;
            }
            Corner::BottomRight => {
                r.x1 += delta.x;
                r.y1 += delta.y;
            }
        },
    }
    r.abs()
}
