//! Built-in and user sources through the naga GLSL front end
//!
//! These run without a GPU: only translation and validation are exercised.

use shaderdeck::pipeline::{AssemblyOptions, EditorAction, EditorDocument, FragmentId, defaults};
use shaderdeck_config::EditorMode;
use shaderdeck_render::{RenderError, StageKind, translate_program};

#[test]
fn test_default_pipeline_translates() {
    let doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    let program = translate_program(doc.vertex_source(), doc.assembled())
        .unwrap_or_else(|e| panic!("default pipeline failed: {e}\n{}", doc.assembled()));
    assert!(program.fragment_wgsl.contains("fn main"));
    assert!(program.vertex_wgsl.contains("fn main"));
}

#[test]
fn test_every_block_enabled_translates() {
    let mut doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    for fragment in defaults::default_fragments() {
        if !fragment.enabled {
            doc.apply(EditorAction::ToggleBlock(fragment.id.clone()))
                .unwrap();
        }
    }
    translate_program(doc.vertex_source(), doc.assembled())
        .unwrap_or_else(|e| panic!("all blocks failed: {e}\n{}", doc.assembled()));
}

#[test]
fn test_no_blocks_translates() {
    let mut doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    for fragment in defaults::default_fragments() {
        if fragment.enabled {
            doc.apply(EditorAction::ToggleBlock(fragment.id.clone()))
                .unwrap();
        }
    }
    assert!(translate_program(doc.vertex_source(), doc.assembled()).is_ok());
}

#[test]
fn test_default_single_source_translates() {
    let doc = EditorDocument::with_defaults(EditorMode::Single, AssemblyOptions::default());
    assert_eq!(doc.assembled(), defaults::DEFAULT_SINGLE_SOURCE);
    translate_program(doc.vertex_source(), doc.assembled())
        .unwrap_or_else(|e| panic!("single source failed: {e}"));
}

#[test]
fn test_broken_block_reports_fragment_error() {
    let mut doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    doc.apply(EditorAction::Select(shaderdeck::pipeline::EditTarget::Block(
        FragmentId::new("border"),
    )))
    .unwrap();
    doc.apply(EditorAction::ReplaceText("  color = notDeclared;".to_string()))
        .unwrap();

    let err = translate_program(doc.vertex_source(), doc.assembled()).unwrap_err();
    assert!(err.is_shader_error());
    match err {
        RenderError::GlslParse { stage, .. } | RenderError::ShaderValidation { stage, .. } => {
            assert_eq!(stage, StageKind::Fragment);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_double_precision_block_is_rejected_before_the_gpu() {
    let mut doc = EditorDocument::with_defaults(EditorMode::Pipeline, AssemblyOptions::default());
    doc.apply(EditorAction::Select(shaderdeck::pipeline::EditTarget::Block(
        FragmentId::new("border"),
    )))
    .unwrap();
    doc.apply(EditorAction::ReplaceText(
        "  double k = 1.0;\n  color = color * float(k);".to_string(),
    ))
    .unwrap();

    let err = translate_program(doc.vertex_source(), doc.assembled()).unwrap_err();
    assert!(err.is_shader_error());
    assert!(matches!(
        err,
        RenderError::ShaderValidation {
            stage: StageKind::Fragment,
            ..
        }
    ));
}

#[test]
fn test_single_source_reading_unwritten_varying_is_rejected() {
    let mut doc = EditorDocument::with_defaults(EditorMode::Single, AssemblyOptions::default());
    doc.set_single_source(
        "layout(location = 1) in float extra;\nvoid main() {\n  fragColor = vec4(uColor * extra, 1.0);\n}\n"
            .to_string(),
    );

    let err = translate_program(doc.vertex_source(), doc.assembled()).unwrap_err();
    assert!(err.is_shader_error());
    assert!(matches!(err, RenderError::StageInterface { .. }));
}
