//! Typed error types for shaderdeck-render.
//!
//! Callers at the crate boundary can match on specific variants instead of
//! relying on opaque `anyhow` strings. The editor shows shader variants in its
//! diagnostics panel.

use thiserror::Error;

/// Which shader stage a translation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// One diagnostic from the GLSL front end, positioned in user source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlslDiagnostic {
    /// 1-based line in the user's source, `None` if the error is in the prelude
    pub line: Option<u32>,
    /// Front-end error message
    pub message: String,
}

impl std::fmt::Display for GlslDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "(prelude): {}", self.message),
        }
    }
}

/// Top-level error type for the GPU preview.
#[derive(Debug, Error)]
pub enum RenderError {
    // -----------------------------------------------------------------------
    // GPU initialisation
    // -----------------------------------------------------------------------
    /// A suitable wgpu GPU adapter could not be found for the given surface.
    #[error("GPU adapter not found: no compatible GPU adapter available for this surface")]
    AdapterNotFound,

    /// The wgpu device could not be created or the device was lost.
    #[error("GPU device error: {0}")]
    DeviceError(String),

    /// The wgpu surface could not be created for the window.
    #[error("GPU surface creation failed: {0}")]
    SurfaceCreation(String),

    // -----------------------------------------------------------------------
    // Shader errors
    // -----------------------------------------------------------------------
    /// The GLSL source could not be parsed.
    #[error("GLSL parse error in {stage} shader:\n{}", format_diagnostics(.diagnostics))]
    GlslParse {
        stage: StageKind,
        diagnostics: Vec<GlslDiagnostic>,
    },

    /// The shader module failed naga validation.
    #[error("Shader validation failed for {stage} shader: {details}")]
    ShaderValidation { stage: StageKind, details: String },

    /// WGSL generation (from the naga IR) failed.
    #[error("WGSL code generation failed for {stage} shader: {details}")]
    WgslGeneration { stage: StageKind, details: String },

    /// The fragment stage reads a value the vertex stage does not write.
    #[error("Shader stages do not link: {details}")]
    StageInterface { details: String },

    /// The device rejected the shader modules or the render pipeline.
    #[error("GPU rejected the shader program: {details}")]
    ProgramCreation { details: String },

    // -----------------------------------------------------------------------
    // Surface / presentation
    // -----------------------------------------------------------------------
    /// `Surface::get_current_texture()` failed (timeout, outdated, lost, ...).
    #[error("GPU surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

impl RenderError {
    /// True for errors caused by the user's shader text rather than the GPU.
    pub fn is_shader_error(&self) -> bool {
        matches!(
            self,
            RenderError::GlslParse { .. }
                | RenderError::ShaderValidation { .. }
                | RenderError::WgslGeneration { .. }
                | RenderError::StageInterface { .. }
                | RenderError::ProgramCreation { .. }
        )
    }
}

fn format_diagnostics(diagnostics: &[GlslDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Convenience conversions from common upstream error types
// ---------------------------------------------------------------------------

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::SurfaceCreation(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceError(e.to_string())
    }
}
