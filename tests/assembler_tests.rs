//! Tests for shader assembly
//!
//! Ordering, toggling and purity of the assembled fragment shader.

use shaderdeck::pipeline::{
    AssemblyOptions, FragmentId, Pipeline, ShaderFragment, ShaderTemplate, assemble,
};

fn template() -> ShaderTemplate {
    ShaderTemplate {
        header: "// header\n".to_string(),
        utils: "float f() { return 1.0; }\n".to_string(),
        prologue: "  vec3 color = vec3(0.0);".to_string(),
        epilogue: "  fragColor = vec4(color, 1.0);\n".to_string(),
    }
}

fn no_markers() -> AssemblyOptions {
    AssemblyOptions {
        block_markers: false,
    }
}

fn abc() -> Pipeline {
    Pipeline::new(vec![
        ShaderFragment::new("a", "A", "  color.r = 1.0;"),
        ShaderFragment::new("b", "B", "  color.g = 1.0;").disabled(),
        ShaderFragment::new("c", "C", "  color.b = 1.0;"),
    ])
    .unwrap()
}

#[test]
fn test_empty_enabled_set() {
    let t = template();
    let fragments = vec![
        ShaderFragment::new("a", "A", "  a();").disabled(),
        ShaderFragment::new("b", "B", "  b();").disabled(),
    ];
    let expected = format!(
        "{}{}void main() {{\n{}\n\n{}}}",
        t.header, t.utils, t.prologue, t.epilogue
    );
    assert_eq!(assemble(&t, &fragments, no_markers()), expected);
    assert_eq!(assemble(&t, &[], AssemblyOptions::default()), expected);
}

#[test]
fn test_disabled_block_is_skipped() {
    let out = assemble(&template(), abc().fragments(), no_markers());
    let a = out.find("color.r").unwrap();
    let c = out.find("color.b").unwrap();
    assert!(a < c);
    assert!(!out.contains("color.g"));
}

#[test]
fn test_reorder_changes_output_order() {
    let pipeline = abc().moved(&FragmentId::new("c"), Some(&FragmentId::new("a")));
    let ids: Vec<&str> = pipeline.fragments().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);

    let out = assemble(&template(), pipeline.fragments(), no_markers());
    let a = out.find("color.r").unwrap();
    let c = out.find("color.b").unwrap();
    assert!(c < a);
}

#[test]
fn test_toggle_round_trip_is_byte_identical() {
    let pipeline = abc();
    let before = assemble(&template(), pipeline.fragments(), AssemblyOptions::default());

    let id = FragmentId::new("a");
    let off = pipeline.toggled(&id).unwrap();
    let during = assemble(&template(), off.fragments(), AssemblyOptions::default());
    assert!(!during.contains("color.r"));

    let on = off.toggled(&id).unwrap();
    let after = assemble(&template(), on.fragments(), AssemblyOptions::default());
    assert_eq!(before, after);
}

#[test]
fn test_assembly_is_deterministic() {
    let pipeline = abc();
    let first = assemble(&template(), pipeline.fragments(), AssemblyOptions::default());
    let second = assemble(&template(), pipeline.fragments(), AssemblyOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_reorder_onto_itself_is_noop() {
    let pipeline = abc();
    let a = FragmentId::new("a");
    assert_eq!(pipeline.moved(&a, Some(&a)), pipeline);
    assert_eq!(pipeline.moved(&a, None), pipeline);
}

#[test]
fn test_markers_name_each_enabled_block() {
    let out = assemble(&template(), abc().fragments(), AssemblyOptions::default());
    assert!(out.contains("// [A]\n  color.r = 1.0;\n"));
    assert!(out.contains("// [C]\n  color.b = 1.0;\n"));
    assert!(!out.contains("// [B]"));
}

#[test]
fn test_output_shape() {
    let out = assemble(&template(), abc().fragments(), no_markers());
    assert!(out.starts_with("// header\nfloat f()"));
    assert!(out.contains("void main() {\n  vec3 color = vec3(0.0);\n  color.r = 1.0;\n"));
    assert!(out.ends_with("  color.b = 1.0;\n\n  fragColor = vec4(color, 1.0);\n}"));
}
