//! Built-in shader sources loaded at start-up.
//!
//! The preview declares the uniforms, `vUv` and `fragColor`; these sources
//! only use them.

use super::fragment::ShaderFragment;
use super::template::ShaderTemplate;

/// Vertex stage used in both editor modes
pub const DEFAULT_VERTEX_SOURCE: &str = "\
void main() {
  vUv = uv;
  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
";

const HEADER: &str = "\
// Bound by the preview: uSize, uRadius, uBorderWidth, uColor, uBorderColor,
// uOpacity, uBgOpacity, uResolution, uTime, vUv and fragColor.

";

const UTILS: &str = "\
// Signed distance to a rounded box centred at the origin
float sdRoundedBox(vec2 p, vec2 b, float r) {
  vec2 q = abs(p) - b + vec2(r);
  return min(max(q.x, q.y), 0.0) + length(max(q, vec2(0.0))) - r;
}

";

const PROLOGUE: &str = "\
  // Pixel position relative to the quad centre
  vec2 p = (vUv - vec2(0.5)) * uSize;
  vec2 halfSize = uSize * 0.5;
  float d = sdRoundedBox(p, halfSize, uRadius);
  float smoothEdge = 1.0;

  vec3 color = uColor;
  float fillAlpha = 1.0 - smoothstep(-smoothEdge, 0.0, d);
  float borderAlpha = 0.0;";

const EPILOGUE: &str = "\
  float finalOpacity = (borderAlpha + fillAlpha) * uOpacity;
  if (finalOpacity < 0.001) discard;
  fragColor = vec4(color, finalOpacity);
";

const BORDER_BLOCK: &str = "\
  fillAlpha = 1.0 - smoothstep(-uBorderWidth - smoothEdge, -uBorderWidth, d);
  if (uBorderWidth > 0.01) {
    borderAlpha = (1.0 - smoothstep(0.0, smoothEdge, d)) - fillAlpha;
  }
  float totalAlpha = borderAlpha + fillAlpha;
  if (totalAlpha > 0.001) {
    color = mix(uColor, uBorderColor, vec3(borderAlpha / totalAlpha));
  }";

const BG_OPACITY_BLOCK: &str = "\
  fillAlpha *= uBgOpacity;";

const GRADIENT_BLOCK: &str = "\
  color = color * mix(0.8, 1.2, vUv.y);";

const PULSE_BLOCK: &str = "\
  color = color + vec3(0.08 * sin(uTime * 3.0));";

/// Single-mode starting text: a complete fragment shader
pub const DEFAULT_SINGLE_SOURCE: &str = "\
float sdRoundedBox(vec2 p, vec2 b, float r) {
  vec2 q = abs(p) - b + vec2(r);
  return min(max(q.x, q.y), 0.0) + length(max(q, vec2(0.0))) - r;
}

void main() {
  vec2 p = (vUv - vec2(0.5)) * uSize;
  float d = sdRoundedBox(p, uSize * 0.5, uRadius);
  float smoothEdge = 1.0;

  float fillAlpha = 1.0 - smoothstep(-uBorderWidth - smoothEdge, -uBorderWidth, d);
  float borderAlpha = 0.0;
  if (uBorderWidth > 0.01) {
    borderAlpha = (1.0 - smoothstep(0.0, smoothEdge, d)) - fillAlpha;
  }

  vec3 color = uColor;
  float totalAlpha = borderAlpha + fillAlpha;
  if (totalAlpha > 0.001) {
    color = mix(uColor, uBorderColor, vec3(borderAlpha / totalAlpha));
  }

  float finalOpacity = (borderAlpha + fillAlpha * uBgOpacity) * uOpacity;
  if (finalOpacity < 0.001) discard;
  fragColor = vec4(color, finalOpacity);
}
";

pub fn default_template() -> ShaderTemplate {
    ShaderTemplate {
        header: HEADER.to_string(),
        utils: UTILS.to_string(),
        prologue: PROLOGUE.to_string(),
        epilogue: EPILOGUE.to_string(),
    }
}

/// Blocks in their initial order
pub fn default_fragments() -> Vec<ShaderFragment> {
    vec![
        ShaderFragment::new("border", "Border", BORDER_BLOCK),
        ShaderFragment::new("bg-opacity", "Background Opacity", BG_OPACITY_BLOCK),
        ShaderFragment::new("gradient", "Vertical Gradient", GRADIENT_BLOCK).disabled(),
        ShaderFragment::new("pulse", "Pulse", PULSE_BLOCK).disabled(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique() {
        let fragments = default_fragments();
        let ids: HashSet<_> = fragments.iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids.len(), fragments.len());
    }

    #[test]
    fn test_border_fades_outside_the_box_edge() {
        // Outer anti-aliasing ramp runs from the SDF edge outwards
        for source in [BORDER_BLOCK, DEFAULT_SINGLE_SOURCE] {
            assert!(source.contains("1.0 - smoothstep(0.0, smoothEdge, d)"));
            assert!(!source.contains("1.0 - smoothstep(-smoothEdge, 0.0, d)) - fillAlpha"));
        }
    }

    #[test]
    fn test_sources_do_not_redeclare_bindings() {
        for source in [DEFAULT_SINGLE_SOURCE, BORDER_BLOCK, PROLOGUE, EPILOGUE] {
            assert!(!source.contains("uniform "));
            assert!(!source.contains("gl_FragColor"));
        }
    }
}
