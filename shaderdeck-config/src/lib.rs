//! Configuration system for the shaderdeck live shader editor.
//!
//! This crate provides configuration loading, saving, and default values
//! for the editor. It includes:
//!
//! - Window and editor settings
//! - The statically declared shader parameter record bound to uniforms
//! - Editor mode and log level types

pub mod config;
pub mod defaults;
pub mod error;
pub mod params;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ConfigError, ParamError};
pub use params::{ParamRange, ShaderParams};
pub use types::{EditorMode, LogLevel};
