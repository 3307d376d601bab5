//! Shader assembly: template parts plus enabled blocks, in list order.

use super::fragment::ShaderFragment;
use super::template::ShaderTemplate;

/// Options that affect the assembled text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Prefix each block body with `// [name]`
    pub block_markers: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            block_markers: true,
        }
    }
}

/// Assemble one fragment-shader source.
///
/// Output is `header + utils + "void main() {\n" + prologue + "\n"`, then for
/// every enabled fragment its optional marker line and source followed by a
/// newline, then `"\n" + epilogue + "}"`. No GLSL checking happens here.
pub fn assemble(
    template: &ShaderTemplate,
    fragments: &[ShaderFragment],
    options: AssemblyOptions,
) -> String {
    let body_len: usize = fragments
        .iter()
        .filter(|f| f.enabled)
        .map(|f| f.source.len() + f.name.len() + 8)
        .sum();
    let mut out = String::with_capacity(
        template.header.len()
            + template.utils.len()
            + template.prologue.len()
            + template.epilogue.len()
            + body_len
            + 32,
    );

    out.push_str(&template.header);
    out.push_str(&template.utils);
    out.push_str("void main() {\n");
    out.push_str(&template.prologue);
    out.push('\n');

    for fragment in fragments.iter().filter(|f| f.enabled) {
        if options.block_markers {
            out.push_str("// [");
            out.push_str(&fragment.name);
            out.push_str("]\n");
        }
        out.push_str(&fragment.source);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&template.epilogue);
    out.push('}');
    out
}
