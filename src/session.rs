//! Session files: a saved editor document plus parameter values, as YAML.

use serde::{Deserialize, Serialize};
use shaderdeck_config::{EditorMode, ParamError, ShaderParams};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::{
    AssemblyOptions, EditorDocument, Pipeline, PipelineError, ShaderFragment, ShaderTemplate,
    defaults,
};

/// Errors from session persistence
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse session YAML: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("Failed to serialize session: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Invalid shader blocks: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Invalid parameter: {0}")]
    Params(#[from] ParamError),
}

/// Serialized editor document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub mode: EditorMode,

    #[serde(default = "default_single_source")]
    pub single_source: String,

    #[serde(default = "defaults::default_template")]
    pub template: ShaderTemplate,

    #[serde(default = "defaults::default_fragments")]
    pub fragments: Vec<ShaderFragment>,

    #[serde(default)]
    pub params: ShaderParams,
}

fn default_single_source() -> String {
    defaults::DEFAULT_SINGLE_SOURCE.to_string()
}

impl Session {
    /// Capture the current document and parameters
    pub fn capture(document: &EditorDocument, params: &ShaderParams) -> Self {
        Self {
            mode: document.mode(),
            single_source: document.single_source().to_string(),
            template: document.template().clone(),
            fragments: document.pipeline().fragments().to_vec(),
            params: *params,
        }
    }

    /// Validate and turn into a live document
    pub fn into_document(
        self,
        options: AssemblyOptions,
    ) -> Result<(EditorDocument, ShaderParams), SessionError> {
        self.params.validate()?;
        let pipeline = Pipeline::new(self.fragments)?;
        let document =
            EditorDocument::from_parts(self.mode, self.single_source, self.template, pipeline, options);
        Ok((document, self.params))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, SessionError> {
        serde_yaml_ng::from_str(contents).map_err(SessionError::Parse)
    }

    pub fn to_yaml(&self) -> Result<String, SessionError> {
        serde_yaml_ng::to_string(self).map_err(SessionError::Serialize)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let contents = fs::read_to_string(path)?;
        let session = Self::from_yaml(&contents)?;
        log::info!(
            "Loaded session {} ({} blocks)",
            path.display(),
            session.fragments.len()
        );
        Ok(session)
    }

    /// Write the session, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        log::info!("Saved session to {}", path.display());
        Ok(())
    }
}

/// Suggested path for a new session file
pub fn default_session_path() -> PathBuf {
    shaderdeck_config::Config::sessions_dir().join("session.yaml")
}
