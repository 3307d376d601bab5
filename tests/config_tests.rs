use shaderdeck::cli::{RuntimeOptions, initial_document};
use shaderdeck::pipeline::defaults;
use shaderdeck::session::Session;
use shaderdeck_config::{Config, EditorMode, ShaderParams};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_yaml_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");

    let mut config = Config::new().with_window_size(1024, 768);
    config.block_markers = false;
    config.params.width = 420.0;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_out_of_range_param_in_config_rejected() {
    let result = Config::from_yaml("params:\n  opacity: 3.0\n");
    assert!(result.is_err());
}

#[test]
fn test_default_startup_uses_config() {
    let mut config = Config::default();
    config.block_markers = false;
    config.params.radius = 8.0;

    let (document, params) = initial_document(&RuntimeOptions::default(), &config).unwrap();
    assert_eq!(document.mode(), EditorMode::Pipeline);
    assert!(!document.assembled().contains("// ["));
    assert_eq!(params.radius, 8.0);
}

#[test]
fn test_mode_flag_overrides_config() {
    let config = Config::default();
    let options = RuntimeOptions {
        mode: Some(EditorMode::Single),
        ..RuntimeOptions::default()
    };
    let (document, _) = initial_document(&options, &config).unwrap();
    assert_eq!(document.assembled(), defaults::DEFAULT_SINGLE_SOURCE);
}

#[test]
fn test_shader_flag_starts_single_mode_with_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("mine.glsl");
    fs::write(&path, "void main() { fragColor = vec4(uColor, 1.0); }").unwrap();

    let options = RuntimeOptions {
        shader: Some(path),
        ..RuntimeOptions::default()
    };
    let (document, _) = initial_document(&options, &Config::default()).unwrap();
    assert_eq!(document.mode(), EditorMode::Single);
    assert_eq!(
        document.assembled(),
        "void main() { fragColor = vec4(uColor, 1.0); }"
    );
}

#[test]
fn test_session_flag_loads_params() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("s.yaml");
    let params = ShaderParams {
        width: 500.0,
        ..ShaderParams::default()
    };
    let session = Session::from_yaml("mode: single\n").unwrap();
    Session {
        params,
        ..session
    }
    .save(&path)
    .unwrap();

    let options = RuntimeOptions {
        session: Some(path),
        ..RuntimeOptions::default()
    };
    let (document, loaded) = initial_document(&options, &Config::default()).unwrap();
    assert_eq!(document.mode(), EditorMode::Single);
    assert_eq!(loaded.width, 500.0);
}

#[test]
fn test_shader_flag_rejects_pipeline_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("mine.glsl");
    fs::write(&path, "void main() { fragColor = vec4(1.0); }").unwrap();

    let options = RuntimeOptions {
        shader: Some(path.clone()),
        mode: Some(EditorMode::Pipeline),
        ..RuntimeOptions::default()
    };
    let err = initial_document(&options, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("pipeline mode"));

    let options = RuntimeOptions {
        shader: Some(path),
        mode: Some(EditorMode::Single),
        ..RuntimeOptions::default()
    };
    let (document, _) = initial_document(&options, &Config::default()).unwrap();
    assert_eq!(document.mode(), EditorMode::Single);
}
