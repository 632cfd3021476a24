//! Replay scripts: the component, its modules, and the input to feed the router.

use crate::ReplayError;
use kurbo::{Point, Rect, Vec2};
use plotinput_core::{
    AxisFrame, ButtonGroup, InteractionModule, KeyEvent, ModuleTarget, Orientation, PointerEvent,
    RouterConfig, Strategy,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A complete replay script.
///
/// ```json
/// {
///   "bounds": { "x0": 0, "y0": 0, "x1": 400, "y1": 300 },
///   "region": { "x0": 50, "y0": 50, "x1": 350, "y1": 250 },
///   "modules": [{ "label": "Zoom", "strategy": "box", "arm": "primary" }],
///   "steps": [
///     { "type": "down", "position": [10, 10], "button": "left" },
///     { "type": "up", "position": [50, 40], "button": "left" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: RouterConfig,
    pub bounds: Rect,
    pub region: Rect,
    #[serde(default)]
    pub axes: Option<AxisFrame>,
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded replay script from {}", path.display());
        Self::from_json_str(&json)
    }
}

/// One module to register before the replay starts.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSpec {
    pub label: String,
    pub strategy: String,
    #[serde(default)]
    pub target: ModuleTarget,
    #[serde(default)]
    pub arm: Option<ButtonGroup>,
    #[serde(default)]
    pub fire_on_keys: bool,
}

impl ModuleSpec {
    pub fn build(&self) -> Result<InteractionModule, ReplayError> {
        let strategy = strategy_by_name(&self.strategy)?;
        let module = InteractionModule::for_target(self.label.clone(), self.target, strategy)?;
        Ok(module.with_key_events(self.fire_on_keys))
    }
}

/// Look up a strategy by its script name.
pub fn strategy_by_name(name: &str) -> Result<Strategy, ReplayError> {
    let strategy = match name {
        "box" => Strategy::boxed(),
        "crosshair" => Strategy::crosshair(),
        "hslice" => Strategy::slice(Orientation::Horizontal),
        "vslice" => Strategy::slice(Orientation::Vertical),
        "length" => Strategy::length(),
        "point_slope" => Strategy::point_slope(),
        "angle" => Strategy::angle(),
        "hrange" => Strategy::range(Orientation::Horizontal),
        "vrange" => Strategy::range(Orientation::Vertical),
        "gesture_box" => Strategy::gesture_or_box(),
        "gesture_hrange" => Strategy::gesture_or_range(Orientation::Horizontal),
        other => return Err(ReplayError::UnknownStrategy(other.to_string())),
    };
    Ok(strategy)
}

/// One input step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// `{ "type": "down" | "up" | "move" | "scroll", ... }`
    Pointer(PointerEvent),
    /// `{ "key": "escape" }` or `{ "key": { "char": "p" } }`
    Key(KeyEvent),
    /// `{ "wheel": [x, y], "delta": [dx, dy] }`
    Wheel { wheel: Point, delta: Vec2 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotinput_core::{Key, PointerButton};

    #[test]
    fn test_parse_minimal_script() {
        let script = Script::from_json_str(
            r#"{
                "bounds": { "x0": 0, "y0": 0, "x1": 400, "y1": 300 },
                "region": { "x0": 50, "y0": 50, "x1": 350, "y1": 250 }
            }"#,
        )
        .unwrap();
        assert_eq!(script.config, RouterConfig::default());
        assert!(script.modules.is_empty());
        assert!(script.steps.is_empty());
        assert!(script.axes.is_none());
    }

    #[test]
    fn test_parse_steps() {
        let steps: Vec<Step> = serde_json::from_str(
            r#"[
                { "type": "down", "position": [10, 10], "button": "left" },
                { "key": { "char": "p" } },
                { "key": "escape" },
                { "wheel": [5, 5], "delta": [0, -1] }
            ]"#,
        )
        .unwrap();
        assert_eq!(steps[0], Step::Pointer(PointerEvent::down((10.0, 10.0), PointerButton::Left)));
        assert_eq!(steps[1], Step::Key(KeyEvent::char('p')));
        assert_eq!(steps[2], Step::Key(KeyEvent::new(Key::Escape)));
        assert_eq!(
            steps[3],
            Step::Wheel {
                wheel: Point::new(5.0, 5.0),
                delta: Vec2::new(0.0, -1.0)
            }
        );
    }

    #[test]
    fn test_every_strategy_name_resolves() {
        for name in [
            "box",
            "crosshair",
            "hslice",
            "vslice",
            "length",
            "point_slope",
            "angle",
            "hrange",
            "vrange",
            "gesture_box",
            "gesture_hrange",
        ] {
            assert!(strategy_by_name(name).is_ok(), "{name}");
        }
        assert!(matches!(strategy_by_name("lasso"), Err(ReplayError::UnknownStrategy(_))));
    }

    #[test]
    fn test_axis_module_rejects_wrong_strategy() {
        let spec = ModuleSpec {
            label: "X".to_string(),
            strategy: "vrange".to_string(),
            target: ModuleTarget::HorizontalAxis,
            arm: None,
            fire_on_keys: false,
        };
        assert!(matches!(spec.build(), Err(ReplayError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }
}
