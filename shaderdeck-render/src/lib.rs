//! GPU preview renderer for the shaderdeck live shader editor.
//!
//! Provides:
//! - GLSL → WGSL translation of the user's shader through naga
//! - A single-quad preview pipeline with per-frame uniform updates
//! - Window surface and device setup

pub mod error;
pub mod gpu_context;
pub mod preview_renderer;

pub use error::{GlslDiagnostic, RenderError, StageKind};
pub use gpu_context::GpuContext;
pub use preview_renderer::transpiler::{TranslatedProgram, translate_program};
pub use preview_renderer::{PreviewRenderer, PreviewViewport};
