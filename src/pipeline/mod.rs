//! Shader pipeline model: blocks, template, assembler and editor state.

pub mod assembler;
pub mod defaults;
pub mod fragment;
pub mod state;
pub mod template;

pub use assembler::{AssemblyOptions, assemble};
pub use fragment::{FragmentId, ShaderFragment};
pub use state::{EditTarget, EditorAction, EditorDocument, Pipeline, PipelineError};
pub use template::{ShaderTemplate, TemplatePart};
