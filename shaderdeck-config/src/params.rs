//! Shader parameters exposed in the "Shader Uniforms" control panel.
//!
//! Every parameter is a named field with a declared range. There is no
//! dynamic lookup by uniform name: the renderer maps each field to a fixed
//! slot in its uniform block.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};

/// Inclusive numeric range and slider step for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Name shown in the control panel and in validation errors
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    /// Slider step; `None` means continuous
    pub step: Option<f32>,
}

impl ParamRange {
    /// Check a value against this range.
    pub fn check(&self, value: f32) -> Result<(), ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite { name: self.name });
        }
        if value < self.min || value > self.max {
            return Err(ParamError::OutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Values bound to the preview shader's uniforms every frame.
///
/// Colours are stored as sRGB bytes; the renderer converts them to linear
/// before upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaderParams {
    /// Quad width in logical pixels (`uSize.x`)
    #[serde(default = "crate::defaults::param_width")]
    pub width: f32,

    /// Quad height in logical pixels (`uSize.y`)
    #[serde(default = "crate::defaults::param_height")]
    pub height: f32,

    /// Corner radius in pixels (`uRadius`)
    #[serde(default = "crate::defaults::param_radius")]
    pub radius: f32,

    /// Border width in pixels (`uBorderWidth`)
    #[serde(default = "crate::defaults::param_border_width")]
    pub border_width: f32,

    /// Fill colour (`uColor`)
    #[serde(default = "crate::defaults::param_color")]
    pub color: [u8; 3],

    /// Border colour (`uBorderColor`)
    #[serde(default = "crate::defaults::param_border_color")]
    pub border_color: [u8; 3],

    /// Overall opacity (`uOpacity`)
    #[serde(default = "crate::defaults::param_opacity")]
    pub opacity: f32,

    /// Fill opacity, border unaffected (`uBgOpacity`)
    #[serde(default = "crate::defaults::param_bg_opacity")]
    pub bg_opacity: f32,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            width: crate::defaults::param_width(),
            height: crate::defaults::param_height(),
            radius: crate::defaults::param_radius(),
            border_width: crate::defaults::param_border_width(),
            color: crate::defaults::param_color(),
            border_color: crate::defaults::param_border_color(),
            opacity: crate::defaults::param_opacity(),
            bg_opacity: crate::defaults::param_bg_opacity(),
        }
    }
}

impl ShaderParams {
    pub const WIDTH: ParamRange = ParamRange {
        name: "width",
        min: 10.0,
        max: 1000.0,
        step: Some(10.0),
    };
    pub const HEIGHT: ParamRange = ParamRange {
        name: "height",
        min: 10.0,
        max: 1000.0,
        step: Some(10.0),
    };
    pub const RADIUS: ParamRange = ParamRange {
        name: "radius",
        min: 0.0,
        max: 100.0,
        step: None,
    };
    pub const BORDER_WIDTH: ParamRange = ParamRange {
        name: "borderWidth",
        min: 0.0,
        max: 50.0,
        step: None,
    };
    pub const OPACITY: ParamRange = ParamRange {
        name: "opacity",
        min: 0.0,
        max: 1.0,
        step: None,
    };
    pub const BG_OPACITY: ParamRange = ParamRange {
        name: "bgOpacity",
        min: 0.0,
        max: 1.0,
        step: None,
    };

    /// Check every numeric field against its declared range.
    pub fn validate(&self) -> Result<(), ParamError> {
        Self::WIDTH.check(self.width)?;
        Self::HEIGHT.check(self.height)?;
        Self::RADIUS.check(self.radius)?;
        Self::BORDER_WIDTH.check(self.border_width)?;
        Self::OPACITY.check(self.opacity)?;
        Self::BG_OPACITY.check(self.bg_opacity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ShaderParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = ShaderParams {
            width: 5.0,
            ..ShaderParams::default()
        };
        let err = params.validate().expect_err("width below minimum");
        assert!(matches!(err, ParamError::OutOfRange { name: "width", .. }));

        let params = ShaderParams {
            opacity: 1.5,
            ..ShaderParams::default()
        };
        let err = params.validate().expect_err("opacity above maximum");
        assert!(matches!(err, ParamError::OutOfRange { name: "opacity", .. }));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = ShaderParams {
            radius: f32::NAN,
            ..ShaderParams::default()
        };
        let err = params.validate().expect_err("radius is NaN");
        assert_eq!(err, ParamError::NotFinite { name: "radius" });
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(ShaderParams::WIDTH.check(10.0).is_ok());
        assert!(ShaderParams::WIDTH.check(1000.0).is_ok());
        assert!(ShaderParams::BORDER_WIDTH.check(0.0).is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: ShaderParams = serde_yaml_ng::from_str("radius: 42.0\n").unwrap();
        assert_eq!(params.radius, 42.0);
        assert_eq!(params.width, 300.0);
        assert_eq!(params.color, [0x3b, 0x82, 0xf6]);
    }
}
