//! Tests for session persistence

use shaderdeck::pipeline::{
    AssemblyOptions, EditorAction, EditorDocument, FragmentId, defaults,
};
use shaderdeck::session::{Session, SessionError};
use shaderdeck_config::{EditorMode, ShaderParams};
use tempfile::TempDir;

fn edited_document() -> EditorDocument {
    let mut doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    doc.apply(EditorAction::ToggleBlock(FragmentId::new("gradient")))
        .unwrap();
    doc.apply(EditorAction::MoveBlock {
        source: FragmentId::new("bg-opacity"),
        target: Some(FragmentId::new("border")),
    })
    .unwrap();
    doc.apply(EditorAction::ReplaceText("  fillAlpha *= 0.5;".to_string()))
        .unwrap();
    doc
}

#[test]
fn test_session_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("look.yaml");

    let doc = edited_document();
    let params = ShaderParams {
        radius: 42.0,
        color: [0xff, 0x00, 0x80],
        ..ShaderParams::default()
    };
    Session::capture(&doc, &params).save(&path).unwrap();

    let (loaded, loaded_params) = Session::load(&path)
        .unwrap()
        .into_document(AssemblyOptions::default())
        .unwrap();
    assert_eq!(loaded_params, params);
    assert_eq!(loaded.pipeline(), doc.pipeline());
    assert_eq!(loaded.assembled(), doc.assembled());
    assert_eq!(loaded.mode(), EditorMode::Pipeline);
}

#[test]
fn test_duplicate_block_ids_rejected() {
    let yaml = r#"
mode: pipeline
fragments:
  - id: fill
    name: Fill
    source: "  color = uColor;"
  - id: fill
    name: Fill again
    source: "  color = uBorderColor;"
"#;
    let session = Session::from_yaml(yaml).unwrap();
    let result = session.into_document(AssemblyOptions::default());
    assert!(matches!(result, Err(SessionError::Pipeline(_))));
}

#[test]
fn test_flags_default_when_omitted() {
    let yaml = r#"
fragments:
  - id: tint
    name: Tint
    source: "  color *= 0.5;"
  - id: off
    name: Off
    source: "  color = vec3(0.0);"
    enabled: false
    read_only: true
"#;
    let session = Session::from_yaml(yaml).unwrap();
    assert!(session.fragments[0].enabled);
    assert!(!session.fragments[0].read_only);
    assert!(!session.fragments[1].enabled);
    assert!(session.fragments[1].read_only);
    assert_eq!(session.mode, EditorMode::Pipeline);
    assert_eq!(session.template, defaults::default_template());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let result = Session::from_yaml("fragments: [unclosed");
    assert!(matches!(result, Err(SessionError::Parse(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Session::load(&temp_dir.path().join("none.yaml"));
    assert!(matches!(result, Err(SessionError::Io(_))));
}
