// Library exports for integration tests

#[macro_use]
pub mod debug;

pub mod app;
pub mod cli;
pub mod editor_ui;
pub mod editor_window;
pub mod params_ui;
pub mod pipeline;
pub mod session;
pub mod shader_watcher;

/// Application version, shown by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
