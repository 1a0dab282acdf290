//! Bridge configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields `BridgeConfig::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::error::BridgeError;

/// Configuration for loading and driving a guest module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Maximum linear memory pages (1 page = 64 KiB).
    /// Default: 256 pages = 16 MiB.
    pub max_memory_pages: u32,

    /// Import module name the bridge functions are registered under.
    pub import_module: String,

    /// Whether guest `log` calls reach the log sink.
    pub enable_guest_logs: bool,

    /// Stroke width for the software canvas.
    pub line_width: f64,

    /// Largest `width * height` the software canvas will allocate.
    pub max_canvas_pixels: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_memory_pages: 256, // 16 MiB
            import_module: "env".to_string(),
            enable_guest_logs: true,
            line_width: masm_hostapi::canvas::DEFAULT_LINE_WIDTH,
            max_canvas_pixels: masm_hostapi::canvas::MAX_PIXELS,
        }
    }
}

impl BridgeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, BridgeError> {
        toml::from_str(s).map_err(|e| BridgeError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Memory cap in bytes.
    pub fn max_memory_bytes(&self) -> usize {
        self.max_memory_pages as usize * 65536
    }
}
