//! Tests for external shader file hot reload

use shaderdeck::shader_watcher::{ShaderReloadEvent, ShaderWatcher};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_shader(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("Failed to write shader");
    path
}

#[test]
fn test_watcher_creation_with_valid_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_shader(&temp_dir, "effect.glsl", "void main() {}");

    let watcher = ShaderWatcher::new(&path, 100).expect("Failed to create watcher");
    assert_eq!(watcher.debounce_delay_ms(), 100);
    assert_eq!(watcher.path().file_name(), path.file_name());
    // No events before anything changes
    assert!(watcher.try_recv().is_none());
}

#[test]
fn test_watcher_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert!(ShaderWatcher::new(&temp_dir.path().join("nope.glsl"), 100).is_err());
}

#[test]
fn test_shader_reload_event_properties() {
    let event = ShaderReloadEvent {
        path: PathBuf::from("/path/to/effect.glsl"),
    };
    let clone = event.clone();
    assert_eq!(event, clone);
    assert!(format!("{:?}", event).contains("effect.glsl"));
}

#[test]
fn test_file_change_triggers_event() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_shader(&temp_dir, "effect.glsl", "void main() {}");

    let watcher = ShaderWatcher::new(&path, 50).expect("Failed to create watcher");
    std::thread::sleep(std::time::Duration::from_millis(150));

    fs::write(&path, "void main() { fragColor = vec4(1.0); }").expect("Failed to write shader");
    std::thread::sleep(std::time::Duration::from_millis(300));

    // Poll timing varies by platform, so only check the event when one arrived
    if let Some(event) = watcher.try_recv() {
        assert_eq!(event.path.file_name(), path.file_name());
        assert_eq!(
            event.read().unwrap(),
            "void main() { fragColor = vec4(1.0); }"
        );
    }
}
