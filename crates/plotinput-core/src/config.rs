//! Router settings, loadable from JSON.

use crate::error::{ConfigError, ConfigResult};
use crate::gesture::GestureConfig;
use crate::input::{Key, ModifierKey};
use crate::region::{EDGE_BAND, MOVE_ZONE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables of the input router. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Width of the resize band around each control-region edge.
    pub edge_band: f64,
    /// Half-size of the move hot zone at the control-region center.
    pub move_zone: f64,
    /// Modifier that enables resize and move of the control region.
    pub edit_modifier: ModifierKey,
    /// Modifier that turns left/middle presses into menu requests.
    pub menu_modifier: Option<ModifierKey>,
    /// Key that pins the current drag session.
    pub pin_key: Key,
    /// Arming a module disarms the others in the same button group.
    pub exclusive_arming: bool,
    pub gesture: GestureConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            edge_band: EDGE_BAND,
            move_zone: MOVE_ZONE,
            edit_modifier: ModifierKey::Ctrl,
            menu_modifier: None,
            pin_key: Key::Char('p'),
            exclusive_arming: true,
            gesture: GestureConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a positive finite number, got {value}"),
        })
    }
}

impl RouterConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded router config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("edge_band", self.edge_band)?;
        positive("move_zone", self.move_zone)?;
        positive("gesture.radius", self.gesture.radius)?;
        if self.pin_key == Key::Escape {
            return Err(ConfigError::InvalidValue {
                field: "pin_key",
                reason: "escape always cancels and cannot pin".to_string(),
            });
        }
        Ok(())
    }
}
