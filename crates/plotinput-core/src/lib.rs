//! plotinput Core Library
//!
//! Pointer-input engine for interactive plotting surfaces: routes presses, drags
//! and keys to a movable control region or to armed interaction modules, draws
//! transient feedback, and promotes finished drags to point, range and gesture
//! events.

pub mod config;
pub mod dirty;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod module;
pub mod region;
pub mod registry;
pub mod router;
pub mod strategy;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RouterConfig;
pub use dirty::DirtyRegion;
pub use error::{ConfigError, ModuleError, StrategyError, SurfaceError};
pub use events::{GestureEvent, PlaneValue, PointEvent, RangeEvent, RangeExtent, SelectionEvent};
pub use geometry::{AxisFrame, AxisMapping, DragSpan, GeometryProvider, Orientation, Span};
pub use gesture::{Gesture, GestureConfig, GestureRecognizer};
pub use input::{Key, KeyEvent, ModifierKey, Modifiers, PointerButton, PointerEvent};
pub use module::{Cursor, InteractionModule, ModuleBehavior, ModuleTarget};
pub use region::{ControlRegion, RegionHandle};
pub use registry::{ButtonGroup, ModuleMenu, ModuleRegistry};
pub use router::{CallbackFailure, DispatchPhase, ErrorSink, InputRouter, PressOutcome, RouterState};
pub use strategy::{DragStrategy, Strategy};
pub use surface::{DrawCommand, RecordingSurface, Surface};
