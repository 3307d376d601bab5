//! Core `Config` struct and its YAML persistence.

use crate::error::ConfigError;
use crate::params::ShaderParams;
use crate::types::{EditorMode, LogLevel};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the shader editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Window
    // ========================================================================
    /// Window title
    #[serde(default = "crate::defaults::window_title")]
    pub window_title: String,

    /// Initial window width in logical pixels
    #[serde(default = "crate::defaults::window_width")]
    pub window_width: u32,

    /// Initial window height in logical pixels
    #[serde(default = "crate::defaults::window_height")]
    pub window_height: u32,

    /// Clear colour behind the preview quad [R, G, B]
    #[serde(default = "crate::defaults::background_color")]
    pub background_color: [u8; 3],

    // ========================================================================
    // Editor
    // ========================================================================
    /// Code editor font size in points
    #[serde(default = "crate::defaults::editor_font_size")]
    pub editor_font_size: f32,

    /// Initial width of the editor side panel in logical pixels
    #[serde(default = "crate::defaults::editor_panel_width")]
    pub editor_panel_width: f32,

    /// Prefix each assembled block with a `// [name]` comment
    #[serde(default = "crate::defaults::block_markers")]
    pub block_markers: bool,

    /// Editor mode used when no session or shader file is given
    #[serde(default = "crate::defaults::default_mode")]
    pub default_mode: EditorMode,

    /// Debounce delay for external shader file reloads (milliseconds)
    #[serde(default = "crate::defaults::hot_reload_debounce_ms")]
    pub hot_reload_debounce_ms: u64,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Log level for the debug log file (overridden by `--log-level` and `RUST_LOG`)
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    // ========================================================================
    // Shader Parameters
    // ========================================================================
    /// Initial values for the "Shader Uniforms" panel
    #[serde(default)]
    pub params: ShaderParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: crate::defaults::window_title(),
            window_width: crate::defaults::window_width(),
            window_height: crate::defaults::window_height(),
            background_color: crate::defaults::background_color(),
            editor_font_size: crate::defaults::editor_font_size(),
            editor_panel_width: crate::defaults::editor_panel_width(),
            block_markers: crate::defaults::block_markers(),
            default_mode: crate::defaults::default_mode(),
            hot_reload_debounce_ms: crate::defaults::hot_reload_debounce_ms(),
            log_level: crate::defaults::log_level(),
            params: ShaderParams::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the editor font size
    pub fn with_editor_font_size(mut self, size: f32) -> Self {
        self.editor_font_size = size;
        self
    }

    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            log::info!("Loading existing config from {:?}", config_path);
            Ok(Self::load_from(&config_path)?)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values that serde cannot enforce
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        if !(self.editor_font_size.is_finite() && self.editor_font_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "editor_font_size must be positive, got {}",
                self.editor_font_size
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Validation(
                "window_width and window_height must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        Ok(self.save_to(&Self::config_path())?)
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("shaderdeck")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("shaderdeck")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Directory where sessions are saved by default
    pub fn sessions_dir() -> PathBuf {
        Self::config_dir().join("sessions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.window_title, "shaderdeck");
        assert_eq!(config.editor_font_size, 14.0);
        assert!(config.block_markers);
        assert_eq!(config.default_mode, EditorMode::Pipeline);
        assert_eq!(config.log_level, LogLevel::Off);
        assert_eq!(config.params, ShaderParams::default());
    }

    #[test]
    fn test_config_builders() {
        let config = Config::new()
            .with_window_size(800, 600)
            .with_editor_font_size(18.0);
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.editor_font_size, 18.0);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml("block_markers: false\ndefault_mode: single\n").unwrap();
        assert!(!config.block_markers);
        assert_eq!(config.default_mode, EditorMode::Single);
        assert_eq!(config.window_width, 1400);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = Config::from_yaml("params:\n  width: 4000.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = Config::from_yaml("window_width: [not, a, number]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.yaml");

        let mut config = Config::new().with_window_size(1024, 768);
        config.params.radius = 12.0;
        config.log_level = LogLevel::Debug;
        config.save_to(&path).expect("save config");

        let loaded = Config::load_from(&path).expect("load config");
        assert_eq!(loaded, config);
    }
}
