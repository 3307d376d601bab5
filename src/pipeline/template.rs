use serde::{Deserialize, Serialize};

/// Fixed-order boilerplate around the block bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplatePart {
    /// Declarations before everything else
    Header,
    /// Helper functions
    Utils,
    /// Start of `main()`, before the first block
    Prologue,
    /// End of `main()`, after the last block
    Epilogue,
}

impl TemplatePart {
    /// Tab label
    pub fn display_name(&self) -> &'static str {
        match self {
            TemplatePart::Header => "Header",
            TemplatePart::Utils => "Utils",
            TemplatePart::Prologue => "Setup",
            TemplatePart::Epilogue => "Finish",
        }
    }

    /// All parts in assembly order
    pub fn all() -> &'static [TemplatePart] {
        &[
            TemplatePart::Header,
            TemplatePart::Utils,
            TemplatePart::Prologue,
            TemplatePart::Epilogue,
        ]
    }
}

/// Boilerplate strings the assembler places around the enabled blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderTemplate {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub utils: String,
    #[serde(default)]
    pub prologue: String,
    #[serde(default)]
    pub epilogue: String,
}

impl ShaderTemplate {
    pub fn part(&self, part: TemplatePart) -> &str {
        match part {
            TemplatePart::Header => &self.header,
            TemplatePart::Utils => &self.utils,
            TemplatePart::Prologue => &self.prologue,
            TemplatePart::Epilogue => &self.epilogue,
        }
    }

    /// Copy with one part replaced
    pub fn with_part(&self, part: TemplatePart, text: impl Into<String>) -> Self {
        let mut template = self.clone();
        let slot = match part {
            TemplatePart::Header => &mut template.header,
            TemplatePart::Utils => &mut template.utils,
            TemplatePart::Prologue => &mut template.prologue,
            TemplatePart::Epilogue => &mut template.epilogue,
        };
        *slot = text.into();
        template
    }
}
