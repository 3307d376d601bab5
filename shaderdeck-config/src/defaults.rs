//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` and `ShaderParams` fields.

use crate::types::{EditorMode, LogLevel};

// ── Window ─────────────────────────────────────────────────────────────────

pub fn window_title() -> String {
    "shaderdeck".to_string()
}

pub fn window_width() -> u32 {
    1400
}

pub fn window_height() -> u32 {
    860
}

pub fn background_color() -> [u8; 3] {
    [17, 17, 17] // #111, behind the preview quad
}

// ── Editor ─────────────────────────────────────────────────────────────────

pub fn editor_font_size() -> f32 {
    14.0
}

pub fn editor_panel_width() -> f32 {
    560.0 // Roughly half of the default window
}

pub fn block_markers() -> bool {
    true // Prefix each block body with a `// [name]` comment
}

pub fn default_mode() -> EditorMode {
    EditorMode::Pipeline
}

pub fn log_level() -> LogLevel {
    LogLevel::Off
}

pub fn hot_reload_debounce_ms() -> u64 {
    100
}

// ── Shader parameters ──────────────────────────────────────────────────────

pub fn param_width() -> f32 {
    300.0
}

pub fn param_height() -> f32 {
    200.0
}

pub fn param_radius() -> f32 {
    20.0
}

pub fn param_border_width() -> f32 {
    2.0
}

pub fn param_color() -> [u8; 3] {
    [0x3b, 0x82, 0xf6] // #3b82f6
}

pub fn param_border_color() -> [u8; 3] {
    [0x1e, 0x40, 0xaf] // #1e40af
}

pub fn param_opacity() -> f32 {
    1.0
}

pub fn param_bg_opacity() -> f32 {
    1.0
}
