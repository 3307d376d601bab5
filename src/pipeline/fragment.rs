use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a pipeline block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FragmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named piece of fragment-shader body code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderFragment {
    pub id: FragmentId,
    /// Name shown in the block list and in `// [name]` markers
    pub name: String,
    pub source: String,
    /// Disabled blocks are skipped by the assembler
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Read-only blocks can be viewed but not edited
    #[serde(default)]
    pub read_only: bool,
}

fn default_enabled() -> bool {
    true
}

impl ShaderFragment {
    /// Create an enabled, editable block
    pub fn new(id: impl Into<FragmentId>, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: source.into(),
            enabled: true,
            read_only: false,
        }
    }

    /// Builder: start disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Builder: mark read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}
