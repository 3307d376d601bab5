//! GLSL to WGSL translation for the preview program.
//!
//! User shaders are written against a small set of runtime bindings that the
//! preview provides through a stage prelude:
//!
//! - Uniforms: `projectionMatrix`, `modelViewMatrix`, `uSize`, `uRadius`,
//!   `uBorderWidth`, `uColor`, `uOpacity`, `uBorderColor`, `uBgOpacity`,
//!   `uResolution`, `uTime`
//! - Vertex inputs: `position` (vec3), `uv` (vec2)
//! - Varying: `vUv` (written by the vertex stage, read by the fragment stage)
//! - Fragment output: `fragColor`
//!
//! The prelude is prepended, the result is parsed by naga's GLSL front end,
//! validated, and written back out as WGSL for `wgpu`.
//!
//! Validation runs without optional capabilities, so sources that need device
//! features the preview does not request (`double`, for instance) are rejected
//! here instead of by the device. Location-bound values passed between the
//! stages are also checked, since `wgpu` only links stages at pipeline
//! creation.

use crate::error::{GlslDiagnostic, RenderError, StageKind};

/// Uniform block shared by both stages.
/// Layout must match `PreviewUniforms` (std140, 192 bytes).
const UNIFORM_BLOCK: &str = r#"layout(set = 0, binding = 0) uniform PreviewUniforms {
    mat4 projectionMatrix; // offset 0
    mat4 modelViewMatrix;  // offset 64
    vec2 uSize;            // offset 128
    float uRadius;         // offset 136
    float uBorderWidth;    // offset 140
    vec3 uColor;           // offset 144
    float uOpacity;        // offset 156
    vec3 uBorderColor;     // offset 160
    float uBgOpacity;      // offset 172
    vec2 uResolution;      // offset 176
    float uTime;           // offset 184
    float uPad0;           // offset 188
};                         // total: 192 bytes
"#;

const VERTEX_IO: &str = r#"layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;
layout(location = 0) out vec2 vUv;
"#;

const FRAGMENT_IO: &str = r#"layout(location = 0) in vec2 vUv;
layout(location = 0) out vec4 fragColor;
"#;

/// Build the prelude for a stage.
pub fn prelude(stage: StageKind) -> String {
    let io = match stage {
        StageKind::Vertex => VERTEX_IO,
        StageKind::Fragment => FRAGMENT_IO,
    };
    format!("#version 450\n\n{UNIFORM_BLOCK}\n{io}\n")
}

/// Prepend the stage prelude to user source.
pub fn wrap_glsl(stage: StageKind, source: &str) -> String {
    let mut wrapped = prelude(stage);
    wrapped.push_str(source);
    if !source.ends_with('\n') {
        wrapped.push('\n');
    }
    wrapped
}

/// WGSL sources for both stages of the preview program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedProgram {
    pub vertex_wgsl: String,
    pub fragment_wgsl: String,
}

/// Translate both stages. Vertex errors are reported first, then
/// mismatches between vertex outputs and fragment inputs.
pub fn translate_program(
    vertex_glsl: &str,
    fragment_glsl: &str,
) -> Result<TranslatedProgram, RenderError> {
    let vertex = parse_stage(vertex_glsl, StageKind::Vertex)?;
    let fragment = parse_stage(fragment_glsl, StageKind::Fragment)?;
    check_stage_interface(&vertex.0, &fragment.0)?;

    Ok(TranslatedProgram {
        vertex_wgsl: write_wgsl(&vertex.0, &vertex.1, StageKind::Vertex)?,
        fragment_wgsl: write_wgsl(&fragment.0, &fragment.1, StageKind::Fragment)?,
    })
}

/// Translate one stage of user GLSL (without prelude) to WGSL.
pub fn transpile_glsl_to_wgsl(source: &str, stage: StageKind) -> Result<String, RenderError> {
    let (module, info) = parse_stage(source, stage)?;
    let wgsl = write_wgsl(&module, &info, stage)?;

    log::debug!(
        "Translated {} shader ({} bytes GLSL -> {} bytes WGSL)",
        stage,
        source.len(),
        wgsl.len()
    );
    Ok(wgsl)
}

/// Parse and validate one stage of user GLSL.
fn parse_stage(
    source: &str,
    stage: StageKind,
) -> Result<(naga::Module, naga::valid::ModuleInfo), RenderError> {
    let wrapped = wrap_glsl(stage, source);
    let prelude_lines = prelude(stage).lines().count() as u32;

    let naga_stage = match stage {
        StageKind::Vertex => naga::ShaderStage::Vertex,
        StageKind::Fragment => naga::ShaderStage::Fragment,
    };

    // Parse GLSL using naga
    let mut parser = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(naga_stage);

    let module = parser.parse(&options, &wrapped).map_err(|errors| {
        let diagnostics = errors
            .errors
            .iter()
            .map(|e| {
                let location = e.meta.location(&wrapped);
                let line = location
                    .line_number
                    .checked_sub(prelude_lines)
                    .filter(|line| *line > 0);
                GlslDiagnostic {
                    line,
                    message: e.kind.to_string(),
                }
            })
            .collect();
        RenderError::GlslParse { stage, diagnostics }
    })?;

    // Validate the module against what every device supports
    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderValidation {
        stage,
        details: format!("{:?}", e.into_inner()),
    })?;

    Ok((module, info))
}

/// Generate WGSL output for a validated module.
fn write_wgsl(
    module: &naga::Module,
    info: &naga::valid::ModuleInfo,
    stage: StageKind,
) -> Result<String, RenderError> {
    let mut wgsl = String::new();
    let mut writer =
        naga::back::wgsl::Writer::new(&mut wgsl, naga::back::wgsl::WriterFlags::empty());
    writer
        .write(module, info)
        .map_err(|e| RenderError::WgslGeneration {
            stage,
            details: e.to_string(),
        })?;
    Ok(wgsl)
}

/// Every fragment input location must be written by the vertex stage with
/// the same type.
fn check_stage_interface(
    vertex: &naga::Module,
    fragment: &naga::Module,
) -> Result<(), RenderError> {
    let outputs = entry_point_locations(vertex, Direction::Output);
    for (location, ty) in entry_point_locations(fragment, Direction::Input) {
        match outputs.iter().find(|(out, _)| *out == location) {
            None => {
                return Err(RenderError::StageInterface {
                    details: format!(
                        "fragment input at location {location} is not written by the vertex shader"
                    ),
                });
            }
            Some((_, out_ty)) if *out_ty != ty => {
                return Err(RenderError::StageInterface {
                    details: format!(
                        "fragment input at location {location} is {ty:?} but the vertex shader writes {out_ty:?}"
                    ),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Direction {
    Input,
    Output,
}

/// `(location, type)` for each location-bound input or output of the
/// module's entry points.
fn entry_point_locations(module: &naga::Module, direction: Direction) -> Vec<(u32, naga::TypeInner)> {
    let mut found = Vec::new();
    for entry in &module.entry_points {
        let function = &entry.function;
        match direction {
            Direction::Input => {
                for arg in &function.arguments {
                    collect_locations(module, arg.ty, arg.binding.as_ref(), &mut found);
                }
            }
            Direction::Output => {
                if let Some(result) = &function.result {
                    collect_locations(module, result.ty, result.binding.as_ref(), &mut found);
                }
            }
        }
    }
    found
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    found: &mut Vec<(u32, naga::TypeInner)>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            found.push((*location, module.types[ty].inner.clone()));
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        // Unbound structs carry their bindings on the members
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), found);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "void main() {\n  vUv = uv;\n  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);\n}\n";

    #[test]
    fn test_prelude_declares_bindings() {
        let frag = prelude(StageKind::Fragment);
        assert!(frag.starts_with("#version 450"));
        assert!(frag.contains("uniform PreviewUniforms"));
        assert!(frag.contains("out vec4 fragColor"));
        assert!(!frag.contains("in vec3 position"));

        let vert = prelude(StageKind::Vertex);
        assert!(vert.contains("in vec3 position"));
        assert!(vert.contains("out vec2 vUv"));
    }

    #[test]
    fn test_wrap_appends_trailing_newline() {
        let wrapped = wrap_glsl(StageKind::Fragment, "void main() {}");
        assert!(wrapped.ends_with("void main() {}\n"));
    }

    #[test]
    fn test_simple_program_translates() {
        let fragment = "void main() {\n  fragColor = vec4(uColor, uOpacity);\n}\n";
        let program = translate_program(VERTEX, fragment).expect("translation succeeds");
        assert!(program.vertex_wgsl.contains("@vertex"));
        assert!(program.fragment_wgsl.contains("@fragment"));
    }

    #[test]
    fn test_parse_error_reports_user_line() {
        let fragment = "void main() {\n  fragColor = vec4(1.0)\n}\n";
        let err = transpile_glsl_to_wgsl(fragment, StageKind::Fragment).unwrap_err();
        assert!(err.is_shader_error());
        match err {
            RenderError::GlslParse { stage, diagnostics } => {
                assert_eq!(stage, StageKind::Fragment);
                assert!(!diagnostics.is_empty());
                let line = diagnostics[0].line.expect("error is in user source");
                assert!((2..=3).contains(&line), "unexpected line {line}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_double_precision_is_rejected() {
        let fragment =
            "void main() {\n  double k = 1.0;\n  fragColor = vec4(uColor * float(k), 1.0);\n}\n";
        let err = translate_program(VERTEX, fragment).unwrap_err();
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
    fn test_unmatched_fragment_input_is_rejected() {
        let fragment = "layout(location = 1) in float extra;\nvoid main() {\n  fragColor = vec4(uColor * extra, 1.0);\n}\n";
        let err = translate_program(VERTEX, fragment).unwrap_err();
        assert!(err.is_shader_error());
        match err {
            RenderError::StageInterface { details } => assert!(details.contains("location 1")),
            other => panic!("expected interface error, got {other:?}"),
        }
    }

    #[test]
    fn test_matching_extra_varying_links() {
        let vertex = "layout(location = 1) out float extra;\nvoid main() {\n  vUv = uv;\n  extra = uv.x;\n  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);\n}\n";
        let fragment = "layout(location = 1) in float extra;\nvoid main() {\n  fragColor = vec4(uColor * extra, 1.0);\n}\n";
        assert!(translate_program(vertex, fragment).is_ok());
    }

    #[test]
    fn test_mismatched_varying_type_is_rejected() {
        let vertex = "layout(location = 1) out vec2 extra;\nvoid main() {\n  vUv = uv;\n  extra = uv;\n  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);\n}\n";
        let fragment = "layout(location = 1) in float extra;\nvoid main() {\n  fragColor = vec4(uColor * extra, 1.0);\n}\n";
        assert!(matches!(
            translate_program(vertex, fragment),
            Err(RenderError::StageInterface { .. })
        ));
    }

    #[test]
    fn test_unknown_identifier_is_an_error() {
        let fragment = "void main() {\n  fragColor = vec4(uNoSuchThing);\n}\n";
        assert!(transpile_glsl_to_wgsl(fragment, StageKind::Fragment).is_err());
    }
}
