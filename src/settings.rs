//! Input settings.
//!
//! Loaded from TOML or JSON; every field has a default, so an empty file is
//! valid.
//!
//! ```toml
//! thumb_deadzone = 0.25
//!
//! [[mappings]]
//! vendor_id = 0x2dc8
//! product_id = 0x6001
//! name = "8BitDo SN30 Pro"
//! config.button_map = ["FaceRight", "FaceBottom", ...]   # 24 entries
//! config.axis_map = ["LeftThumbX", "LeftThumbY", "RightThumbX", "None", "None", "RightThumbY"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::gamepad::config::{GamepadConfigTable, MappingOverride};
use crate::gamepad::THUMB_DEADZONE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Deadzone for two-button (stick) axes, in `[0, 1)`.
    pub thumb_deadzone: f32,
    /// Layout overrides, checked before the built-in table.
    pub mappings: Vec<MappingOverride>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            thumb_deadzone: THUMB_DEADZONE,
            mappings: Vec::new(),
        }
    }
}

impl InputSettings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        log::debug!("loading input settings from {}", path.display());
        match ext.as_str() {
            "toml" => Self::from_toml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(InputError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| InputError::InvalidSetting(e.to_string()))
    }

    pub fn config_table(&self) -> GamepadConfigTable {
        GamepadConfigTable::with_overrides(self.mappings.clone())
    }

    fn validate(self) -> Result<Self> {
        if !(0.0..1.0).contains(&self.thumb_deadzone) {
            return Err(InputError::InvalidSetting(format!(
                "thumb_deadzone must be in [0, 1), got {}",
                self.thumb_deadzone
            )));
        }
        Ok(self)
    }
}
