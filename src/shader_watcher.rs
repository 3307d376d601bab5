//! External shader file watcher
//!
//! Watches the GLSL file given with `--shader` and reports modifications so
//! the editor can replace its single-block text. Debounced to avoid several
//! reloads during one save.

use anyhow::{Context, Result};
use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, Instant};

/// Event indicating the watched file changed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderReloadEvent {
    /// Canonical path of the changed file
    pub path: PathBuf,
}

impl ShaderReloadEvent {
    /// Read the new file contents
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read shader file {}", self.path.display()))
    }
}

/// Watches one shader file
pub struct ShaderWatcher {
    /// The file system watcher
    _watcher: PollWatcher,
    /// Receiver for file change events
    event_receiver: Receiver<ShaderReloadEvent>,
    /// Canonical path being watched
    path: PathBuf,
    /// Debounce delay in milliseconds
    debounce_delay_ms: u64,
}

impl std::fmt::Debug for ShaderWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderWatcher")
            .field("path", &self.path)
            .field("debounce_delay_ms", &self.debounce_delay_ms)
            .finish_non_exhaustive()
    }
}

impl ShaderWatcher {
    /// Start watching `shader_path`
    pub fn new(shader_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !shader_path.exists() {
            anyhow::bail!("Shader file not found: {}", shader_path.display());
        }
        let canonical = shader_path
            .canonicalize()
            .unwrap_or_else(|_| shader_path.to_path_buf());
        let filename = canonical
            .file_name()
            .map(|name| name.to_os_string())
            .with_context(|| format!("Shader path has no file name: {}", canonical.display()))?;
        // Watch the parent directory; editors that save atomically (write temp + rename)
        // replace the file rather than modifying it.
        let dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = channel();
        let last_sent: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));
        let debounce_delay = Duration::from_millis(debounce_delay_ms);
        let event_path = canonical.clone();

        let mut watcher = PollWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                log::debug!(
                    "File system event: {:?} for paths: {:?}",
                    event.kind,
                    event.paths
                );

                if !matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    log::trace!("Ignoring event kind: {:?}", event.kind);
                    return;
                }

                // Match by filename (handles atomic saves where the path changes)
                if !event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(filename.as_os_str()))
                {
                    return;
                }

                let should_send = {
                    let now = Instant::now();
                    let mut last = last_sent.lock();
                    match *last {
                        Some(previous) if now.duration_since(previous) < debounce_delay => {
                            log::trace!("Debouncing shader reload");
                            false
                        }
                        _ => {
                            *last = Some(now);
                            true
                        }
                    }
                };

                if should_send {
                    log::info!("Shader file changed: {}", event_path.display());
                    if let Err(e) = tx.send(ShaderReloadEvent {
                        path: event_path.clone(),
                    }) {
                        log::error!("Failed to send shader reload event: {}", e);
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(100)),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch shader directory: {}", dir.display()))?;
        log::info!("Shader hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
            path: canonical,
            debounce_delay_ms,
        })
    }

    /// Next pending reload event, without blocking
    pub fn try_recv(&self) -> Option<ShaderReloadEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Canonical path of the watched file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn debounce_delay_ms(&self) -> u64 {
        self.debounce_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = ShaderWatcher::new(&temp_dir.path().join("missing.glsl"), 100);
        assert!(result.is_err());
    }

    #[test]
    fn test_reload_event_reads_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let shader_path = temp_dir.path().join("fx.glsl");
        fs::write(&shader_path, "void main() {}").expect("Failed to write shader");

        let event = ShaderReloadEvent {
            path: shader_path.clone(),
        };
        assert_eq!(event.read().unwrap(), "void main() {}");
    }
}
