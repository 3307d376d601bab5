/// GLSL syntax highlighting for the code editor
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Token classes the highlighter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    Preprocessor,
    Number,
    Keyword,
    Type,
    Builtin,
    Identifier,
    Plain,
}

const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "return", "break", "continue", "discard", "switch",
    "case", "default", "in", "out", "inout", "uniform", "const", "layout", "precision",
    "highp", "mediump", "lowp", "struct", "true", "false", "flat", "smooth",
];

const TYPES: &[&str] = &[
    "void", "bool", "int", "uint", "float", "double", "vec2", "vec3", "vec4", "ivec2", "ivec3",
    "ivec4", "uvec2", "uvec3", "uvec4", "bvec2", "bvec3", "bvec4", "mat2", "mat3", "mat4",
    "sampler2D", "samplerCube",
];

const BUILTINS: &[&str] = &[
    "abs", "sign", "floor", "ceil", "fract", "mod", "min", "max", "clamp", "mix", "step",
    "smoothstep", "length", "distance", "dot", "cross", "normalize", "reflect", "refract",
    "pow", "exp", "log", "sqrt", "inversesqrt", "sin", "cos", "tan", "asin", "acos", "atan",
    "radians", "degrees", "texture", "dFdx", "dFdy", "fwidth", "gl_Position", "gl_FragCoord",
    "main",
];

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<comment>//[^\n]*|/\*(?s:.*?)(?:\*/|\z))
            |
            (?P<preproc>(?m:^[\ \t]*\#[^\n]*))
            |
            (?P<number>(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?[fFuU]?)
            |
            (?P<ident>[A-Za-z_][A-Za-z0-9_]*)
            ",
        )
        .expect("Failed to compile GLSL token regex")
    })
}

fn classify_ident(word: &str) -> TokenKind {
    if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if TYPES.contains(&word) {
        TokenKind::Type
    } else if BUILTINS.contains(&word) {
        TokenKind::Builtin
    } else {
        TokenKind::Identifier
    }
}

/// Split `source` into classified byte ranges covering the whole text
pub fn tokenize(source: &str) -> Vec<(Range<usize>, TokenKind)> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in token_regex().captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            tokens.push((cursor..whole.start(), TokenKind::Plain));
        }
        let kind = if caps.name("comment").is_some() {
            TokenKind::Comment
        } else if caps.name("preproc").is_some() {
            TokenKind::Preprocessor
        } else if caps.name("number").is_some() {
            TokenKind::Number
        } else {
            classify_ident(whole.as_str())
        };
        tokens.push((whole.range(), kind));
        cursor = whole.end();
    }

    if cursor < source.len() {
        tokens.push((cursor..source.len(), TokenKind::Plain));
    }
    tokens
}

fn color_for(kind: TokenKind) -> Color32 {
    match kind {
        TokenKind::Comment => Color32::from_rgb(106, 153, 85),
        TokenKind::Preprocessor => Color32::from_rgb(197, 134, 192),
        TokenKind::Number => Color32::from_rgb(181, 206, 168),
        TokenKind::Keyword => Color32::from_rgb(86, 156, 214),
        TokenKind::Type => Color32::from_rgb(78, 201, 176),
        TokenKind::Builtin => Color32::from_rgb(220, 220, 170),
        TokenKind::Identifier => Color32::from_rgb(156, 220, 254),
        TokenKind::Plain => Color32::from_rgb(212, 212, 212),
    }
}

/// Build a coloured layout for the code editor
pub fn highlight(source: &str, font_size: f32, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    let font_id = FontId::monospace(font_size);

    for (range, kind) in tokenize(source) {
        job.append(
            &source[range],
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color: color_for(kind),
                ..Default::default()
            },
        );
    }
    job.wrap.max_width = wrap_width;
    job
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(&str, TokenKind)> {
        tokenize(source)
            .into_iter()
            .filter(|(_, kind)| *kind != TokenKind::Plain)
            .map(|(range, kind)| (&source[range], kind))
            .collect()
    }

    #[test]
    fn test_tokens_cover_source() {
        let source = "float d = 1.0; // edge\n";
        let joined: String = tokenize(source)
            .into_iter()
            .map(|(range, _)| &source[range])
            .collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_classifies_common_tokens() {
        let tokens = kinds("#define K 2\nvec3 c = mix(a, b, 0.5); // done");
        assert_eq!(tokens[0], ("#define K 2", TokenKind::Preprocessor));
        assert!(tokens.contains(&("vec3", TokenKind::Type)));
        assert!(tokens.contains(&("mix", TokenKind::Builtin)));
        assert!(tokens.contains(&("0.5", TokenKind::Number)));
        assert!(tokens.contains(&("c", TokenKind::Identifier)));
        assert_eq!(tokens.last(), Some(&("// done", TokenKind::Comment)));
    }

    #[test]
    fn test_keywords_and_block_comments() {
        let tokens = kinds("/* a\nb */ if (x) discard;");
        assert_eq!(tokens[0], ("/* a\nb */", TokenKind::Comment));
        assert!(tokens.contains(&("if", TokenKind::Keyword)));
        assert!(tokens.contains(&("discard", TokenKind::Keyword)));
    }

    #[test]
    fn test_digits_inside_identifiers_are_not_numbers() {
        let tokens = kinds("vec2 uv2;");
        assert_eq!(tokens, vec![("vec2", TokenKind::Type), ("uv2", TokenKind::Identifier)]);
    }
}
