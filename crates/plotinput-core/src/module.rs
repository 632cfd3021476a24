//! Interaction modules: a named strategy bound to callbacks and listeners.

use crate::error::{ConfigError, ConfigResult, ModuleResult};
use crate::events::{
    DatasetRef, EventHub, GestureEvent, ListenerId, PointEvent, RangeEvent, SelectionEvent,
};
use crate::geometry::{DragSpan, Orientation};
use crate::input::{KeyEvent, PointerButton};
use crate::strategy::{DragStrategy, Strategy};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer cursor shapes the router can ask the shell for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Hand,
    Move,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNE,
    ResizeNW,
    ResizeSE,
    ResizeSW,
}

/// What a module is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleTarget {
    #[default]
    Plot,
    HorizontalAxis,
    VerticalAxis,
}

impl ModuleTarget {
    /// Whether a strategy requiring `orientation` can be bound to this target.
    ///
    /// A plot accepts either orientation; an axis only its own.
    pub fn accepts(self, orientation: Orientation) -> bool {
        match self {
            ModuleTarget::Plot => true,
            ModuleTarget::HorizontalAxis => orientation == Orientation::Horizontal,
            ModuleTarget::VerticalAxis => orientation == Orientation::Vertical,
        }
    }
}

/// Override points forwarded to a module during a session.
///
/// Every method defaults to a no-op, so implementors opt into what they need.
/// Points are in the device frame.
pub trait ModuleBehavior {
    fn pressed(&mut self, _at: Point, _button: PointerButton) -> ModuleResult {
        Ok(())
    }

    fn dragged(&mut self, _span: DragSpan) -> ModuleResult {
        Ok(())
    }

    fn released(&mut self, _span: DragSpan) -> ModuleResult {
        Ok(())
    }

    /// The drag was abandoned with Escape; `released` will not follow.
    fn cancelled(&mut self, _span: DragSpan) -> ModuleResult {
        Ok(())
    }

    fn point_selected(&mut self, _event: &PointEvent) -> ModuleResult {
        Ok(())
    }

    fn wheel_moved(&mut self, _at: Point, _delta: Vec2) -> ModuleResult {
        Ok(())
    }

    fn key_typed(&mut self, _key: &KeyEvent) -> ModuleResult {
        Ok(())
    }
}

/// Behavior that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBehavior;

impl ModuleBehavior for NoBehavior {}

/// A registrable interaction: label, cursor, strategy, callbacks and listeners.
pub struct InteractionModule {
    label: String,
    cursor: Cursor,
    target: ModuleTarget,
    strategy: Strategy,
    behavior: Box<dyn ModuleBehavior>,
    listeners: EventHub,
    dataset: Option<DatasetRef>,
    fire_on_keys: bool,
}

impl fmt::Debug for InteractionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionModule")
            .field("label", &self.label)
            .field("cursor", &self.cursor)
            .field("target", &self.target)
            .field("strategy", &self.strategy.name())
            .field("dataset", &self.dataset)
            .field("fire_on_keys", &self.fire_on_keys)
            .finish_non_exhaustive()
    }
}

impl InteractionModule {
    /// A module attached to a plot area.
    pub fn new(label: impl Into<String>, strategy: Strategy) -> ConfigResult<Self> {
        Self::for_target(label, ModuleTarget::Plot, strategy)
    }

    /// A module attached to `target`.
    ///
    /// Fails when the label is blank or the strategy needs an axis the target is not.
    pub fn for_target(
        label: impl Into<String>,
        target: ModuleTarget,
        strategy: Strategy,
    ) -> ConfigResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if let Some(required) = strategy.required_orientation() {
            if !target.accepts(required) {
                return Err(ConfigError::OrientationMismatch { label, required, target });
            }
        }
        Ok(Self {
            label,
            cursor: strategy.default_cursor(),
            target,
            strategy,
            behavior: Box::new(NoBehavior),
            listeners: EventHub::new(),
            dataset: None,
            fire_on_keys: false,
        })
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_behavior(mut self, behavior: impl ModuleBehavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    /// Promote the drag on every key typed during it.
    pub fn with_key_events(mut self, enabled: bool) -> Self {
        self.fire_on_keys = enabled;
        self
    }

    pub fn with_dataset(mut self, dataset: DatasetRef) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn target(&self) -> ModuleTarget {
        self.target
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn dataset(&self) -> Option<&DatasetRef> {
        self.dataset.as_ref()
    }

    /// Set or clear the dataset carried into point events.
    pub fn set_dataset(&mut self, dataset: Option<DatasetRef>) {
        self.dataset = dataset;
    }

    pub fn fires_on_keys(&self) -> bool {
        self.fire_on_keys
    }

    pub fn add_point_listener(
        &mut self,
        listener: impl FnMut(&PointEvent) + 'static,
    ) -> ListenerId {
        self.listeners.point.add(listener)
    }

    pub fn remove_point_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.point.remove(id)
    }

    pub fn add_range_listener(
        &mut self,
        listener: impl FnMut(&RangeEvent) + 'static,
    ) -> ListenerId {
        self.listeners.range.add(listener)
    }

    pub fn remove_range_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.range.remove(id)
    }

    pub fn add_gesture_listener(
        &mut self,
        listener: impl FnMut(&GestureEvent) + 'static,
    ) -> ListenerId {
        self.listeners.gesture.add(listener)
    }

    pub fn remove_gesture_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.gesture.remove(id)
    }

    pub(crate) fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut dyn ModuleBehavior {
        self.behavior.as_mut()
    }

    /// Hand an event to the listeners for its kind.
    pub(crate) fn deliver(&mut self, event: &SelectionEvent) {
        self.listeners.deliver(event);
    }

    /// Point selection at `at`: the behavior callback, then the point listeners.
    pub(crate) fn point_selected(&mut self, at: Point) -> ModuleResult {
        let event = PointEvent::new(at).with_dataset(self.dataset.clone());
        self.behavior.point_selected(&event)?;
        self.listeners.deliver(&SelectionEvent::Point(event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModuleError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Failing;

    impl ModuleBehavior for Failing {
        fn point_selected(&mut self, _event: &PointEvent) -> ModuleResult {
            Err(ModuleError::callback("nope"))
        }
    }

    #[test]
    fn test_blank_label_rejected() {
        assert!(matches!(
            InteractionModule::new("  ", Strategy::boxed()),
            Err(ConfigError::EmptyLabel)
        ));
    }

    #[test]
    fn test_orientation_checked_against_target() {
        let err = InteractionModule::for_target(
            "Zoom Y",
            ModuleTarget::HorizontalAxis,
            Strategy::range(Orientation::Vertical),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OrientationMismatch {
                required: Orientation::Vertical,
                target: ModuleTarget::HorizontalAxis,
                ..
            }
        ));

        let zoom_x = Strategy::gesture_or_range(Orientation::Horizontal);
        assert!(
            InteractionModule::for_target("Zoom X", ModuleTarget::HorizontalAxis, zoom_x).is_ok()
        );
        assert!(InteractionModule::new("Zoom Y", Strategy::range(Orientation::Vertical)).is_ok());
    }

    #[test]
    fn test_default_cursor_follows_strategy() {
        let module = InteractionModule::new("Probe", Strategy::crosshair()).unwrap();
        assert_eq!(module.cursor(), Cursor::Crosshair);
        let module = module.with_cursor(Cursor::Hand);
        assert_eq!(module.cursor(), Cursor::Hand);
    }

    #[test]
    fn test_point_selected_carries_dataset() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut module = InteractionModule::new("Probe", Strategy::crosshair())
            .unwrap()
            .with_dataset(DatasetRef::new("spectrum"));
        let s = seen.clone();
        module.add_point_listener(move |e| {
            s.borrow_mut().push((e.position(), e.dataset().cloned()))
        });

        module.point_selected(Point::new(4.0, 5.0)).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(Point::new(4.0, 5.0), Some(DatasetRef::new("spectrum")))]
        );
    }

    #[test]
    fn test_failing_behavior_reports_error() {
        let mut module = InteractionModule::new("Probe", Strategy::crosshair())
            .unwrap()
            .with_behavior(Failing);
        assert_eq!(
            module.point_selected(Point::ZERO),
            Err(ModuleError::Callback("nope".to_string()))
        );
    }

    #[test]
    fn test_remove_range_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut module = InteractionModule::new("Zoom", Strategy::boxed()).unwrap();
        let c = count.clone();
        let id = module.add_range_listener(move |_| *c.borrow_mut() += 1);
        let event = SelectionEvent::from(RangeEvent::boxed(Point::ZERO, Point::new(1.0, 1.0)));
        module.deliver(&event);
        assert!(module.remove_range_listener(id));
        module.deliver(&event);
        assert_eq!(*count.borrow(), 1);
    }
}
