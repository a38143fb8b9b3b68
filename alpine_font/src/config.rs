//! Font subsystem configuration.
//!
//! Loads the font list from JSON strings/files (file IO left to the app
//! where possible).

use serde::{Deserialize, Serialize};

/// One entry of the font list: a face name and its descriptor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontListEntry {
    pub name: String,
    pub file: String,
}

/// Font list plus subsystem-wide tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Faces to register at startup, in order.
    pub fonts: Vec<FontListEntry>,
    /// Point size used until a caller sets one.
    #[serde(default = "default_size")]
    pub default_size: f64,
    /// Global UI scale applied by the auto-size helpers.
    #[serde(default = "default_ui_scale")]
    pub ui_scale: f64,
}

fn default_size() -> f64 {
    20.0
}

fn default_ui_scale() -> f64 {
    1.0
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            default_size: default_size(),
            ui_scale: default_ui_scale(),
        }
    }
}

impl FontConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
