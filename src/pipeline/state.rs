//! Editor state container.
//!
//! [`Pipeline`] is an immutable snapshot of the ordered block list; every
//! operation returns a new snapshot. [`EditorDocument`] owns the current
//! snapshot plus the template and single-mode text, applies
//! [`EditorAction`]s, and recomputes the assembled source after each one.

use shaderdeck_config::EditorMode;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use super::assembler::{AssemblyOptions, assemble};
use super::defaults;
use super::fragment::{FragmentId, ShaderFragment};
use super::template::{ShaderTemplate, TemplatePart};

/// Errors from pipeline operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Unknown shader block '{0}'")]
    UnknownFragment(FragmentId),

    #[error("Duplicate shader block id '{0}'")]
    DuplicateFragment(FragmentId),

    #[error("Shader block '{0}' is read-only")]
    ReadOnly(FragmentId),
}

/// Ordered list of shader blocks with unique ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    fragments: Arc<Vec<ShaderFragment>>,
}

impl Pipeline {
    /// Build a pipeline, rejecting duplicate ids
    pub fn new(fragments: Vec<ShaderFragment>) -> Result<Self, PipelineError> {
        let mut seen = HashSet::with_capacity(fragments.len());
        for fragment in &fragments {
            if !seen.insert(&fragment.id) {
                return Err(PipelineError::DuplicateFragment(fragment.id.clone()));
            }
        }
        Ok(Self {
            fragments: Arc::new(fragments),
        })
    }

    pub fn fragments(&self) -> &[ShaderFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: &FragmentId) -> Option<&ShaderFragment> {
        self.fragments.iter().find(|f| &f.id == id)
    }

    pub fn index_of(&self, id: &FragmentId) -> Option<usize> {
        self.fragments.iter().position(|f| &f.id == id)
    }

    /// Snapshot with one block's text replaced
    pub fn with_source(&self, id: &FragmentId, source: impl Into<String>) -> Result<Self, PipelineError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PipelineError::UnknownFragment(id.clone()))?;
        if self.fragments[index].read_only {
            return Err(PipelineError::ReadOnly(id.clone()));
        }
        let mut fragments = self.fragments.as_ref().clone();
        fragments[index].source = source.into();
        Ok(Self {
            fragments: Arc::new(fragments),
        })
    }

    /// Snapshot with `source` moved to the position `target` occupies.
    ///
    /// Array-move: the block is removed from its index and reinserted at the
    /// target's index, shifting the blocks in between. A missing target, a
    /// target equal to the source, or an unknown id leaves the order unchanged.
    pub fn moved(&self, source: &FragmentId, target: Option<&FragmentId>) -> Self {
        let Some(target) = target else {
            return self.clone();
        };
        if source == target {
            return self.clone();
        }
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(target)) else {
            log::debug!("Ignoring move of '{}' onto unknown block '{}'", source, target);
            return self.clone();
        };

        let mut fragments = self.fragments.as_ref().clone();
        let fragment = fragments.remove(from);
        fragments.insert(to, fragment);
        Self {
            fragments: Arc::new(fragments),
        }
    }

    /// Snapshot with one block's enabled flag flipped
    pub fn toggled(&self, id: &FragmentId) -> Result<Self, PipelineError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PipelineError::UnknownFragment(id.clone()))?;
        let mut fragments = self.fragments.as_ref().clone();
        fragments[index].enabled = !fragments[index].enabled;
        Ok(Self {
            fragments: Arc::new(fragments),
        })
    }
}

/// The part of the document the editor pane is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Template(TemplatePart),
    Block(FragmentId),
}

/// Every mutation the UI can request
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Make a part active in the editor pane
    Select(EditTarget),
    /// Replace the active text (full updated text, not a delta)
    ReplaceText(String),
    /// Drag-and-drop result
    MoveBlock {
        source: FragmentId,
        target: Option<FragmentId>,
    },
    ToggleBlock(FragmentId),
    SetMode(EditorMode),
}

/// Authoritative editor state owned by the top-level view
#[derive(Debug, Clone)]
pub struct EditorDocument {
    mode: EditorMode,
    single_source: String,
    vertex_source: String,
    template: ShaderTemplate,
    pipeline: Pipeline,
    active: EditTarget,
    options: AssemblyOptions,
    assembled: String,
}

impl EditorDocument {
    /// Document with the built-in template and blocks
    pub fn with_defaults(mode: EditorMode, options: AssemblyOptions) -> Self {
        let pipeline = Pipeline {
            fragments: Arc::new(defaults::default_fragments()),
        };
        Self::from_parts(
            mode,
            defaults::DEFAULT_SINGLE_SOURCE.to_string(),
            defaults::default_template(),
            pipeline,
            options,
        )
    }

    pub fn from_parts(
        mode: EditorMode,
        single_source: String,
        template: ShaderTemplate,
        pipeline: Pipeline,
        options: AssemblyOptions,
    ) -> Self {
        let active = pipeline
            .fragments()
            .first()
            .map(|f| EditTarget::Block(f.id.clone()))
            .unwrap_or(EditTarget::Template(TemplatePart::Prologue));
        let mut document = Self {
            mode,
            single_source,
            vertex_source: defaults::DEFAULT_VERTEX_SOURCE.to_string(),
            template,
            pipeline,
            active,
            options,
            assembled: String::new(),
        };
        document.reassemble();
        document
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn single_source(&self) -> &str {
        &self.single_source
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn template(&self) -> &ShaderTemplate {
        &self.template
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn active(&self) -> &EditTarget {
        &self.active
    }

    pub fn options(&self) -> AssemblyOptions {
        self.options
    }

    /// Fragment-shader text the preview should compile
    pub fn assembled(&self) -> &str {
        &self.assembled
    }

    /// Text shown in the editor pane
    pub fn active_text(&self) -> &str {
        match self.mode {
            EditorMode::Single => &self.single_source,
            EditorMode::Pipeline => match &self.active {
                EditTarget::Template(part) => self.template.part(*part),
                EditTarget::Block(id) => self
                    .pipeline
                    .get(id)
                    .map(|f| f.source.as_str())
                    .unwrap_or_default(),
            },
        }
    }

    /// Whether the editor pane must refuse input
    pub fn active_is_read_only(&self) -> bool {
        match (&self.mode, &self.active) {
            (EditorMode::Pipeline, EditTarget::Block(id)) => {
                self.pipeline.get(id).is_some_and(|f| f.read_only)
            }
            _ => false,
        }
    }

    /// Apply one action. The assembled source is recomputed afterwards.
    pub fn apply(&mut self, action: EditorAction) -> Result<(), PipelineError> {
        match action {
            EditorAction::Select(target) => {
                if let EditTarget::Block(id) = &target
                    && self.pipeline.get(id).is_none()
                {
                    return Err(PipelineError::UnknownFragment(id.clone()));
                }
                self.active = target;
            }
            EditorAction::ReplaceText(text) => match self.mode {
                EditorMode::Single => self.single_source = text,
                EditorMode::Pipeline => match &self.active {
                    EditTarget::Template(part) => {
                        self.template = self.template.with_part(*part, text);
                    }
                    EditTarget::Block(id) => {
                        self.pipeline = self.pipeline.with_source(id, text)?;
                    }
                },
            },
            EditorAction::MoveBlock { source, target } => {
                self.pipeline = self.pipeline.moved(&source, target.as_ref());
            }
            EditorAction::ToggleBlock(id) => {
                self.pipeline = self.pipeline.toggled(&id)?;
            }
            EditorAction::SetMode(mode) => {
                if mode != self.mode {
                    log::info!("Editor mode -> {}", mode.display_name());
                }
                self.mode = mode;
            }
        }
        self.reassemble();
        Ok(())
    }

    /// Replace the single-mode text regardless of the current mode
    pub fn set_single_source(&mut self, source: String) {
        self.single_source = source;
        self.reassemble();
    }

    pub fn set_options(&mut self, options: AssemblyOptions) {
        self.options = options;
        self.reassemble();
    }

    fn reassemble(&mut self) {
        self.assembled = match self.mode {
            EditorMode::Single => self.single_source.clone(),
            EditorMode::Pipeline => assemble(&self.template, self.pipeline.fragments(), self.options),
        };
    }
}
