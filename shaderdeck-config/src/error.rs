//! Typed error variants for the shaderdeck-config crate.
//!
//! `Config::load` and `Config::save` return `anyhow::Result` at the
//! application boundary; callers that need to distinguish failure modes can
//! downcast to [`ConfigError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use shaderdeck_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Serialize(p) => eprintln!("YAML write error: {p}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    /// The config could not be serialised back to YAML.
    #[error("YAML serialisation error: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        ConfigError::Validation(e.to_string())
    }
}

/// A shader parameter value outside its declared range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Numeric parameter outside `[min, max]`.
    #[error("parameter '{name}' = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Parameter name as shown in the control panel.
        name: &'static str,
        /// Offending value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },

    /// Numeric parameter is NaN or infinite.
    #[error("parameter '{name}' is not a finite number")]
    NotFinite {
        /// Parameter name as shown in the control panel.
        name: &'static str,
    },
}
