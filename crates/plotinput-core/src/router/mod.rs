//! Input router: the pointer-mode state machine.
//!
//! The router receives component-frame pointer input from the shell, decides per
//! press whether it resizes or moves the control region, opens a module menu, or
//! starts a module drag, and dispatches the drag to every armed module. All points
//! it hands to strategies, modules and listeners are in the device frame.
//!
//! Failures raised by module callbacks or strategies are caught per module and
//! reported to the [`ErrorSink`]; the router always completes its own transition.

mod session;
mod sink;

pub use session::RouterState;
pub use sink::{CallbackFailure, DispatchPhase, ErrorSink, LogErrorSink};

use crate::config::RouterConfig;
use crate::dirty::DirtyRegion;
use crate::error::{ConfigError, ConfigResult, ModuleResult};
use crate::events::PlaneValue;
use crate::geometry::{DragSpan, GeometryProvider, to_device};
use crate::input::{Key, KeyEvent, ModifierKey, Modifiers, PointerButton, PointerEvent};
use crate::module::{Cursor, InteractionModule};
use crate::region::{RegionHandle, hit_test_region};
use crate::registry::{ButtonGroup, ModuleMenu, ModuleRegistry};
use crate::strategy::{DragStrategy, FeedbackStyle, PaintContext};
use kurbo::{Point, Rect, Vec2};
use session::{DragSession, PinnedSession, RegionEdit, Session};
use std::fmt;

/// Modifier that marks a promoted selection (e.g. "add to selection").
pub const SELECTION_MODIFIER: ModifierKey = ModifierKey::Shift;
/// Plane carrying the key that promoted a selection.
pub const KEY_CHAR_PLANE: &str = "key_char";

/// What a press did.
#[derive(Debug, Clone, PartialEq)]
pub enum PressOutcome {
    /// A session was already open; the press was dropped.
    Ignored,
    /// The host declined the press location.
    Rejected,
    Resizing(RegionHandle),
    Moving,
    /// The shell should show this menu; the router stays idle.
    Menu(ModuleMenu),
    /// A module drag started with these modules active.
    Dragging { active: Vec<String> },
}

fn isolate(sink: &mut dyn ErrorSink, module: &str, phase: DispatchPhase, result: ModuleResult) {
    if let Err(error) = result {
        sink.report(CallbackFailure {
            module: module.to_string(),
            phase,
            error,
        });
    }
}

fn key_plane(key: &Key) -> Option<PlaneValue> {
    match key {
        Key::Char(c) => Some(PlaneValue::Char(*c)),
        Key::Named(name) => Some(PlaneValue::Text(name.clone())),
        Key::Escape => None,
    }
}

/// Routes pointer, key and wheel input to the control region and to interaction modules.
pub struct InputRouter {
    config: RouterConfig,
    registry: ModuleRegistry,
    session: Option<Session>,
    pinned: Option<PinnedSession>,
    hover: Option<RegionHandle>,
    cursor: Cursor,
    overlay_style: FeedbackStyle,
    sink: Box<dyn ErrorSink>,
}

impl fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRouter")
            .field("state", &self.state())
            .field("modules", &self.registry.len())
            .field("pinned", &self.pinned.is_some())
            .field("hover", &self.hover)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl InputRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            registry: ModuleRegistry::new(config.exclusive_arming),
            config,
            session: None,
            pinned: None,
            hover: None,
            cursor: Cursor::Default,
            overlay_style: FeedbackStyle::default(),
            sink: Box::new(LogErrorSink),
        }
    }

    /// Report callback failures to `sink` instead of the log.
    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Register a module, replacing one with the same label but keeping its arm state.
    ///
    /// A label taking part in the open drag or the pinned session cannot be
    /// replaced until that session ends.
    pub fn register(
        &mut self,
        mut module: InteractionModule,
    ) -> ConfigResult<Option<InteractionModule>> {
        if self.is_busy(module.label()) {
            log::warn!("Module '{}' is in use and was not replaced", module.label());
            return Err(ConfigError::ModuleBusy(module.label().to_string()));
        }
        module.strategy_mut().set_gesture_config(self.config.gesture);
        log::debug!("Registering module '{}' ({})", module.label(), module.strategy().name());
        Ok(self.registry.register(module))
    }

    fn is_busy(&self, label: &str) -> bool {
        self.active_modules()
            .iter()
            .chain(self.pinned_modules())
            .any(|l| l == label)
    }

    pub fn unregister(&mut self, label: &str) -> Option<InteractionModule> {
        self.registry.unregister(label)
    }

    pub fn arm(&mut self, label: &str, group: ButtonGroup) -> bool {
        self.registry.arm(label, group)
    }

    pub fn disarm(&mut self, label: &str, group: ButtonGroup) -> bool {
        self.registry.disarm(label, group)
    }

    pub fn module(&self, label: &str) -> Option<&InteractionModule> {
        self.registry.get(label)
    }

    pub fn module_mut(&mut self, label: &str) -> Option<&mut InteractionModule> {
        self.registry.get_mut(label)
    }

    pub fn state(&self) -> RouterState {
        self.session.as_ref().map_or(RouterState::Idle, Session::state)
    }

    /// Labels of the modules in the open drag, in registration order.
    pub fn active_modules(&self) -> &[String] {
        match &self.session {
            Some(Session::Drag(drag)) => drag.active.as_slice(),
            _ => &[],
        }
    }

    /// Labels of the modules whose released drag is still pinned on screen.
    pub fn pinned_modules(&self) -> &[String] {
        self.pinned.as_ref().map_or(&[], |pinned| pinned.active.as_slice())
    }

    /// Origin and current point of the open session, if any.
    pub fn drag_span(&self) -> Option<DragSpan> {
        self.session.as_ref().map(Session::span)
    }

    /// Origin of the open drag in the component frame.
    pub fn component_origin(&self) -> Option<Point> {
        match &self.session {
            Some(Session::Drag(drag)) => Some(drag.component_origin),
            _ => None,
        }
    }

    /// Previewed control region during a resize or move.
    pub fn preview_region(&self) -> Option<Rect> {
        match &self.session {
            Some(Session::Edit(edit)) => Some(edit.preview),
            _ => None,
        }
    }

    /// Handle the next press would grab, as hinted by the last hover.
    pub fn hover_handle(&self) -> Option<RegionHandle> {
        self.hover
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether a released drag is still latched on screen.
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// Dispatch one pointer event. Returns the outcome for presses.
    pub fn handle_pointer_event(
        &mut self,
        host: &mut dyn GeometryProvider,
        event: &PointerEvent,
    ) -> Option<PressOutcome> {
        match *event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => Some(self.pointer_pressed(host, position, button, modifiers)),
            PointerEvent::Up {
                position,
                button,
                modifiers,
            } => {
                self.pointer_released(host, position, button, modifiers);
                None
            }
            PointerEvent::Move { position, modifiers } => {
                self.pointer_moved(host, position, modifiers);
                None
            }
            PointerEvent::Scroll { position, delta, .. } => {
                self.wheel_moved(host, position, delta);
                None
            }
        }
    }

    fn idle_cursor(&self) -> Cursor {
        if let Some(handle) = self.hover {
            return handle.cursor();
        }
        self.registry
            .armed_labels(ButtonGroup::Primary)
            .first()
            .and_then(|label| self.registry.get(label))
            .map_or(Cursor::Default, InteractionModule::cursor)
    }

    fn region_handle_at(
        &self,
        host: &dyn GeometryProvider,
        device: Point,
        modifiers: Modifiers,
    ) -> Option<RegionHandle> {
        if !modifiers.contains(self.config.edit_modifier) {
            return None;
        }
        let region = host.control_region().to_rect();
        hit_test_region(region, device, self.config.edge_band, self.config.move_zone)
    }

    /// Pointer motion, with or without a button held.
    pub fn pointer_moved(
        &mut self,
        host: &mut dyn GeometryProvider,
        position: Point,
        modifiers: Modifiers,
    ) {
        let device = to_device(host.bounds(), position);
        match self.state() {
            RouterState::Idle => {
                self.hover = self.region_handle_at(host, device, modifiers);
                self.cursor = self.idle_cursor();
            }
            RouterState::Resizing | RouterState::Moving => self.edit_motion(host, device),
            RouterState::Dragging => {
                if let Some(Session::Drag(drag)) = &mut self.session {
                    drag.span.current = device;
                    drag.modifiers = modifiers;
                    let labels = drag.active.clone();
                    log::trace!("Drag motion to ({:.1}, {:.1})", device.x, device.y);
                    let dirty = self.dispatch_motion(host, &labels, true);
                    Self::repaint_drag(host, &labels, &dirty);
                }
            }
        }
    }

    fn edit_motion(&mut self, host: &mut dyn GeometryProvider, device: Point) {
        let Some(Session::Edit(edit)) = &mut self.session else {
            return;
        };
        let preview = edit.update(device);
        let bounds = host.bounds();
        let axes = host.axes();
        let mut ctx = PaintContext::new(host.surface(), bounds, axes);
        match self.overlay_style.outline(&mut ctx, preview) {
            Ok(area) => {
                let dirty = DirtyRegion::track(&mut edit.overlay, DirtyRegion::from_rect(area));
                host.request_repaint(dirty.bounding_box());
            }
            Err(err) => {
                log::warn!("Region preview paint failed: {err}");
                host.request_repaint(None);
            }
        }
    }

    /// Run the per-motion steps for `labels` and collect their dirty regions.
    ///
    /// With `raw`, the motion is also forwarded to each module's `dragged` callback.
    fn dispatch_motion(
        &mut self,
        host: &mut dyn GeometryProvider,
        labels: &[String],
        raw: bool,
    ) -> DirtyRegion {
        let Some(Session::Drag(drag)) = &self.session else {
            return DirtyRegion::new();
        };
        let span = drag.span;
        let modifier_held = drag.modifiers.contains(SELECTION_MODIFIER);
        let bounds = host.bounds();
        let axes = host.axes();
        let sink = self.sink.as_mut();
        let mut dirty = DirtyRegion::new();

        for label in labels {
            let Some(module) = self.registry.get_mut(label) else {
                continue;
            };
            let policy = module.strategy().policy();
            let current = policy.clamp(span.current, bounds);

            if policy.point_callbacks {
                isolate(sink, label, DispatchPhase::Motion, module.point_selected(current));
            }
            if policy.continuous_range {
                match module.strategy().promote(span.origin, current, modifier_held) {
                    Ok(Some(event)) => module.deliver(&event),
                    Ok(None) => {}
                    Err(err) => isolate(sink, label, DispatchPhase::Promote, Err(err.into())),
                }
            }
            if raw {
                isolate(sink, label, DispatchPhase::Motion, module.behavior_mut().dragged(span));
            }

            module.strategy_mut().set_modifier_held(modifier_held);
            let mut ctx = PaintContext::new(host.surface(), bounds, axes);
            match module.strategy_mut().paint(&mut ctx, span.origin, current) {
                Ok(region) => dirty.union(&region),
                Err(err) => isolate(sink, label, DispatchPhase::Paint, Err(err.into())),
            }
        }
        dirty
    }

    fn repaint_drag(host: &mut dyn GeometryProvider, labels: &[String], dirty: &DirtyRegion) {
        if labels.is_empty() {
            return;
        }
        // nothing reported: fall back to a full repaint
        host.request_repaint(dirty.bounding_box());
    }

    /// Clear the strategies of `labels` and return the area they covered.
    fn clear_strategies(&mut self, labels: &[String]) -> DirtyRegion {
        let mut dirty = DirtyRegion::new();
        for label in labels {
            if let Some(module) = self.registry.get_mut(label) {
                dirty.union(&module.strategy_mut().clear());
            }
        }
        dirty
    }

    fn close_pinned(&mut self, host: &mut dyn GeometryProvider, pinned: PinnedSession) {
        log::debug!(
            "Closing pinned session of {:?} ending at {:?}",
            pinned.active,
            pinned.span.current
        );
        let dirty = self.clear_strategies(&pinned.active);
        if let Some(area) = dirty.bounding_box() {
            host.request_repaint(Some(area));
        }
        host.request_repaint(None);
    }

    /// Pointer press.
    pub fn pointer_pressed(
        &mut self,
        host: &mut dyn GeometryProvider,
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> PressOutcome {
        if self.session.is_some() {
            log::warn!("Press with {button:?} ignored: a session is already open");
            return PressOutcome::Ignored;
        }
        let bounds = host.bounds();
        let device = to_device(bounds, position);

        if let Some(pinned) = self.pinned.take() {
            self.close_pinned(host, pinned);
        }

        if !host.accept_context(device) {
            log::warn!("Press at ({:.1}, {:.1}) rejected by host", device.x, device.y);
            return PressOutcome::Rejected;
        }

        if let Some(handle) = self.region_handle_at(host, device, modifiers) {
            let original = host.control_region().to_rect();
            let edit = RegionEdit::new(handle, device, button, original);
            log::debug!("Idle -> {:?} via {handle:?}", edit.state());
            self.session = Some(Session::Edit(edit));
            self.hover = None;
            self.cursor = handle.cursor();
            return if handle.is_move() {
                PressOutcome::Moving
            } else {
                PressOutcome::Resizing(handle)
            };
        }

        let menu_group = match button {
            PointerButton::Right if modifiers.shift => Some(ButtonGroup::Secondary),
            PointerButton::Right => Some(ButtonGroup::Primary),
            _ if self.config.menu_modifier.is_some_and(|m| modifiers.contains(m)) => {
                ButtonGroup::for_button(button)
            }
            _ => None,
        };
        if let Some(group) = menu_group {
            log::debug!("Opening {group:?} module menu");
            return PressOutcome::Menu(self.registry.menu(group, device));
        }

        let Some(group) = ButtonGroup::for_button(button) else {
            return PressOutcome::Ignored;
        };
        let active = self.registry.armed_labels(group);
        log::debug!("Idle -> Dragging with {active:?}");
        self.session = Some(Session::Drag(DragSession::new(
            device,
            position,
            button,
            active.clone(),
            modifiers,
        )));
        self.hover = None;
        self.cursor = active
            .first()
            .and_then(|label| self.registry.get(label))
            .map_or(Cursor::Default, InteractionModule::cursor);

        for label in &active {
            if let Some(module) = self.registry.get_mut(label) {
                let result = module.behavior_mut().pressed(device, button);
                isolate(self.sink.as_mut(), label, DispatchPhase::Press, result);
            }
        }

        // point-oriented modules get the press point right away
        let pointers: Vec<String> = active
            .iter()
            .filter(|label| {
                self.registry
                    .get(label)
                    .is_some_and(|m| m.strategy().wants_point_callbacks())
            })
            .cloned()
            .collect();
        if !pointers.is_empty() {
            let dirty = self.dispatch_motion(host, &pointers, false);
            Self::repaint_drag(host, &pointers, &dirty);
        }

        PressOutcome::Dragging { active }
    }

    /// Pointer release. A release of a different button than the one that opened
    /// the session is ignored.
    pub fn pointer_released(
        &mut self,
        host: &mut dyn GeometryProvider,
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) {
        let device = to_device(host.bounds(), position);
        let session = match self.session.take() {
            Some(session) if session.button() == button => session,
            other => {
                self.session = other;
                return;
            }
        };

        match session {
            Session::Edit(mut edit) => {
                edit.update(device);
                let committed = edit.committed();
                log::debug!("{:?} -> Idle, region now {:?}", edit.state(), committed.to_rect());
                host.set_control_region(committed);
                host.request_repaint(None);
            }
            Session::Drag(mut drag) => {
                drag.span.current = device;
                drag.modifiers = modifiers;
                self.finish_drag(host, drag);
            }
        }
        self.cursor = self.idle_cursor();
    }

    fn finish_drag(&mut self, host: &mut dyn GeometryProvider, drag: DragSession) {
        let span = drag.span;
        let modifier_held = drag.modifiers.contains(SELECTION_MODIFIER);
        let bounds = host.bounds();
        let sink = self.sink.as_mut();

        for label in &drag.active {
            let Some(module) = self.registry.get_mut(label) else {
                continue;
            };
            let current = module.strategy().policy().clamp(span.current, bounds);
            match module.strategy().promote(span.origin, current, modifier_held) {
                Ok(Some(event)) => module.deliver(&event),
                Ok(None) => {}
                Err(err) => isolate(sink, label, DispatchPhase::Promote, Err(err.into())),
            }
            isolate(sink, label, DispatchPhase::Release, module.behavior_mut().released(span));
        }

        if drag.pinned {
            log::debug!("Dragging -> Idle, session pinned");
            self.pinned = Some(PinnedSession {
                active: drag.active,
                span,
                modifiers: drag.modifiers,
            });
        } else {
            log::debug!("Dragging -> Idle");
            self.clear_strategies(&drag.active);
            host.request_repaint(None);
        }
    }

    /// Key press: Escape cancels, the pin key latches a drag, anything else goes
    /// to the active modules, or to the pinned ones once a pinned drag is released.
    pub fn key_pressed(&mut self, host: &mut dyn GeometryProvider, key: &KeyEvent) {
        if key.key == Key::Escape {
            self.cancel(host);
            return;
        }
        let (labels, span, modifiers) = match &mut self.session {
            Some(Session::Drag(drag)) => {
                if key.key == self.config.pin_key {
                    drag.pinned = true;
                    log::debug!("Session pinned");
                    return;
                }
                (drag.active.clone(), drag.span, drag.modifiers)
            }
            Some(Session::Edit(_)) => return,
            None => match &self.pinned {
                Some(pinned) if key.key != self.config.pin_key => {
                    (pinned.active.clone(), pinned.span, pinned.modifiers)
                }
                _ => return,
            },
        };
        let modifier_held = modifiers.contains(SELECTION_MODIFIER);
        self.dispatch_key(host.bounds(), &labels, span, modifier_held, key);
    }

    fn dispatch_key(
        &mut self,
        bounds: Rect,
        labels: &[String],
        span: DragSpan,
        modifier_held: bool,
        key: &KeyEvent,
    ) {
        let sink = self.sink.as_mut();
        for label in labels {
            let Some(module) = self.registry.get_mut(label) else {
                continue;
            };
            isolate(sink, label, DispatchPhase::Key, module.behavior_mut().key_typed(key));
            if !module.fires_on_keys() {
                continue;
            }
            let current = module.strategy().policy().clamp(span.current, bounds);
            match module.strategy().promote(span.origin, current, modifier_held) {
                Ok(Some(event)) => {
                    let event = match key_plane(&key.key) {
                        Some(value) => event.with_plane(KEY_CHAR_PLANE, value),
                        None => event,
                    };
                    module.deliver(&event);
                }
                Ok(None) => {}
                Err(err) => isolate(sink, label, DispatchPhase::Promote, Err(err.into())),
            }
        }
    }

    /// Abandon any open session and pinned overlay without committing.
    ///
    /// Returns false, and does nothing, when there was nothing to cancel.
    pub fn cancel(&mut self, host: &mut dyn GeometryProvider) -> bool {
        let pinned = self.pinned.take();
        let session = self.session.take();
        if pinned.is_none() && session.is_none() {
            return false;
        }
        if let Some(pinned) = pinned {
            self.clear_strategies(&pinned.active);
        }
        if let Some(session) = session {
            log::debug!("{:?} -> Idle (cancelled)", session.state());
            if let Session::Drag(drag) = session {
                for label in &drag.active {
                    if let Some(module) = self.registry.get_mut(label) {
                        let result = module.behavior_mut().cancelled(drag.span);
                        isolate(self.sink.as_mut(), label, DispatchPhase::Cancel, result);
                    }
                }
                self.clear_strategies(&drag.active);
            }
        }
        host.request_repaint(None);
        self.cursor = self.idle_cursor();
        true
    }

    /// Wheel input goes to the modules armed for the secondary button.
    pub fn wheel_moved(&mut self, host: &mut dyn GeometryProvider, position: Point, delta: Vec2) {
        let device = to_device(host.bounds(), position);
        let sink = self.sink.as_mut();
        for label in self.registry.armed_labels(ButtonGroup::Secondary) {
            if let Some(module) = self.registry.get_mut(&label) {
                let result = module.behavior_mut().wheel_moved(device, delta);
                isolate(sink, &label, DispatchPhase::Wheel, result);
            }
        }
    }
}
