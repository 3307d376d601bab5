use parking_lot::Mutex;
/// Logging infrastructure for shaderdeck
///
/// Installs a `log` facade backend that writes to /tmp/shaderdeck_debug.log
/// on Unix/macOS, or %TEMP%\shaderdeck_debug.log on Windows.
///
/// Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
/// file's `log_level`. When `RUST_LOG` is set, records are mirrored to stderr.
use shaderdeck_config::LogLevel;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Crates whose own logging is capped at `Warn` below our configured level
const NOISY_TARGETS: &[&str] = &["wgpu", "naga", "egui", "winit", "calloop", "notify"];

/// Global bridge logger
struct BridgeLogger {
    level: log::LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl BridgeLogger {
    fn new(level: log::LevelFilter, mirror_stderr: bool) -> Self {
        let file = if level != log::LevelFilter::Off {
            match OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
            {
                Ok(mut f) => {
                    let _ = write!(
                        f,
                        "\n{}\nshaderdeck debug session started at {} (level={})\n{}\n",
                        "=".repeat(80),
                        get_timestamp(),
                        level,
                        "=".repeat(80)
                    );
                    Some(f)
                }
                // Logging to stderr still works when the file can't be opened
                Err(_) => None,
            }
        } else {
            None
        };

        Self {
            level,
            file: Mutex::new(file),
            mirror_stderr,
        }
    }

    fn write_line(&self, line: &str) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        let noisy = NOISY_TARGETS
            .iter()
            .any(|prefix| metadata.target().starts_with(prefix));
        !noisy || metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(windows)]
    {
        std::env::temp_dir().join("shaderdeck_debug.log")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp/shaderdeck_debug.log")
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse a `RUST_LOG` value. Only the global level is honoured; for
/// `target=level` directives the last level wins.
fn parse_rust_log(value: &str) -> Option<log::LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?;
            level.trim().parse::<log::LevelFilter>().ok()
        })
        .next_back()
}

/// Resolve the effective level from flag, environment and config
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> log::LevelFilter {
    if let Some(level) = cli_level {
        return level.to_level_filter();
    }
    if let Some(level) = rust_log.and_then(parse_rust_log) {
        return level;
    }
    config_level.to_level_filter()
}

/// Install the bridge logger. Calling it more than once has no effect.
pub fn init_log_bridge(cli_level: Option<LogLevel>, config_level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    let logger = LOGGER.get_or_init(|| BridgeLogger::new(level, rust_log.is_some()));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

/// Log formatted message under a category target
pub fn logf(level: log::Level, category: &str, args: fmt::Arguments) {
    log::log!(target: category, level, "{}", args);
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf(log::Level::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf(log::Level::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf(log::Level::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf(log::Level::Trace, $category, format_args!($($arg)*))
    };
}
