// Hide console window on Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use shaderdeck::app::App;
use shaderdeck::cli;
use shaderdeck_config::Config;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Process CLI arguments first; --export and --check finish here
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            // No app state exists yet, so no destructors are skipped.
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };

    let config = Config::load()?;

    // --log-level takes precedence, then RUST_LOG, then config
    shaderdeck::debug::init_log_bridge(runtime_options.log_level, config.log_level);

    log::info!("Starting shaderdeck {}", shaderdeck::VERSION);

    // Only used to block on the async GPU adapter/device requests
    let runtime = Arc::new(Runtime::new()?);

    let app = App::new(Arc::clone(&runtime), config, runtime_options)?;
    let result = app.run();

    log::info!("Event loop exited, shutting down runtime");
    if let Ok(rt) = Arc::try_unwrap(runtime) {
        rt.shutdown_timeout(std::time::Duration::from_secs(2));
    }

    match result {
        Ok(_) => Ok(()),
        Err(ref e) => {
            eprintln!("shaderdeck: error: {e:#}");
            // On Linux, provide a hint when the error looks like a missing display server
            #[cfg(target_os = "linux")]
            {
                let msg = format!("{e:?}").to_lowercase();
                if msg.contains("display") || msg.contains("wayland") || msg.contains("x server") {
                    eprintln!(
                        "shaderdeck: hint: no display server found; ensure DISPLAY (X11) or \
                         WAYLAND_DISPLAY (Wayland) is set, or use --export/--check"
                    );
                }
            }
            result
        }
    }
}
