use serde::{Deserialize, Serialize};

/// How shader source is presented in the editor pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    /// The whole fragment shader is edited as one block
    Single,
    /// The shader is split into template parts and reorderable blocks
    #[default]
    Pipeline,
}

impl EditorMode {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorMode::Single => "Single",
            EditorMode::Pipeline => "Pipeline",
        }
    }

    /// All available modes for UI iteration
    pub fn all() -> &'static [EditorMode] {
        &[EditorMode::Single, EditorMode::Pipeline]
    }
}

/// Log level for the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to the `log` crate's filter type
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
