//! Per-press session state owned by the router.

use crate::dirty::DirtyRegion;
use crate::geometry::DragSpan;
use crate::input::{Modifiers, PointerButton};
use crate::region::{ControlRegion, RegionHandle, apply_handle};
use kurbo::{Point, Rect};
use serde::Serialize;

/// Committed router state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterState {
    #[default]
    Idle,
    Resizing,
    Moving,
    Dragging,
}

/// A resize or move of the control region, previewed until release.
#[derive(Debug, Clone)]
pub(crate) struct RegionEdit {
    pub handle: RegionHandle,
    pub span: DragSpan,
    pub button: PointerButton,
    pub original: Rect,
    pub preview: Rect,
    pub overlay: DirtyRegion,
}

impl RegionEdit {
    pub fn new(handle: RegionHandle, anchor: Point, button: PointerButton, original: Rect) -> Self {
        Self {
            handle,
            span: DragSpan::at(anchor),
            button,
            original,
            preview: original,
            overlay: DirtyRegion::new(),
        }
    }

    pub fn state(&self) -> RouterState {
        if self.handle.is_move() {
            RouterState::Moving
        } else {
            RouterState::Resizing
        }
    }

    /// Move the pointer to `current` and recompute the preview.
    pub fn update(&mut self, current: Point) -> Rect {
        self.span.current = current;
        self.preview = apply_handle(self.original, self.handle, self.span.delta());
        self.preview
    }

    /// Region to commit on release.
    pub fn committed(&self) -> ControlRegion {
        ControlRegion::from_rect(self.preview)
    }
}

/// A module drag.
#[derive(Debug, Clone)]
pub(crate) struct DragSession {
    pub span: DragSpan,
    /// Origin in the component frame, as received.
    pub component_origin: Point,
    pub button: PointerButton,
    /// Labels of the active modules, in registration order.
    pub active: Vec<String>,
    pub modifiers: Modifiers,
    pub pinned: bool,
}

impl DragSession {
    pub fn new(
        origin: Point,
        component_origin: Point,
        button: PointerButton,
        active: Vec<String>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            span: DragSpan::at(origin),
            component_origin,
            button,
            active,
            modifiers,
            pinned: false,
        }
    }
}

/// A released drag whose feedback stays on screen until the next press.
#[derive(Debug, Clone)]
pub(crate) struct PinnedSession {
    pub active: Vec<String>,
    pub span: DragSpan,
    /// Modifiers held at release; keys typed while pinned promote with them.
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub(crate) enum Session {
    Edit(RegionEdit),
    Drag(DragSession),
}

impl Session {
    pub fn state(&self) -> RouterState {
        match self {
            Session::Edit(edit) => edit.state(),
            Session::Drag(_) => RouterState::Dragging,
        }
    }

    pub fn button(&self) -> PointerButton {
        match self {
            Session::Edit(edit) => edit.button,
            Session::Drag(drag) => drag.button,
        }
    }

    pub fn span(&self) -> DragSpan {
        match self {
            Session::Edit(edit) => edit.span,
            Session::Drag(drag) => drag.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Edge;
    use kurbo::Vec2;

    #[test]
    fn test_resize_preview_moves_one_edge() {
        let original = Rect::new(100.0, 100.0, 300.0, 200.0);
        let mut edit = RegionEdit::new(
            RegionHandle::Edge(Edge::Right),
            Point::new(300.0, 150.0),
            PointerButton::Left,
            original,
        );
        assert_eq!(edit.state(), RouterState::Resizing);
        let preview = edit.update(Point::new(340.0, 170.0));
        assert_eq!(preview, Rect::new(100.0, 100.0, 340.0, 200.0));
        assert_eq!(edit.committed().to_rect(), preview);
    }

    #[test]
    fn test_move_preview_translates() {
        let original = Rect::new(100.0, 100.0, 300.0, 200.0);
        let anchor = Point::new(200.0, 150.0);
        let mut edit = RegionEdit::new(RegionHandle::Center, anchor, PointerButton::Left, original);
        assert_eq!(edit.state(), RouterState::Moving);
        edit.update(Point::new(210.0, 145.0));
        assert_eq!(edit.preview, original + Vec2::new(10.0, -5.0));
    }
}
