//! Orthographic camera for the preview quad.
//!
//! Zoom is 1, so one world unit equals one logical pixel. The camera sits at
//! z = 10 looking down -z. Matrices are column-major and target wgpu's
//! clip space (depth in 0..1).

/// Camera distance from the quad plane
pub const CAMERA_Z: f32 = 10.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 2000.0;

/// Projection for a viewport of `width × height` logical pixels.
pub fn orthographic_projection(width: f32, height: f32) -> [[f32; 4]; 4] {
    let width = width.max(1.0);
    let height = height.max(1.0);
    let depth = FAR - NEAR;
    [
        [2.0 / width, 0.0, 0.0, 0.0],
        [0.0, 2.0 / height, 0.0, 0.0],
        [0.0, 0.0, -1.0 / depth, 0.0],
        [0.0, 0.0, -NEAR / depth, 1.0],
    ]
}

/// View (translate by -CAMERA_Z) times model (scale to `width × height`).
pub fn quad_model_view(width: f32, height: f32) -> [[f32; 4]; 4] {
    [
        [width, 0.0, 0.0, 0.0],
        [0.0, height, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, -CAMERA_Z, 1.0],
    ]
}

/// Multiply a column-major matrix by a column vector.
pub fn transform(m: &[[f32; 4]; 4], v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (col, component) in m.iter().zip(v) {
        for (row, value) in col.iter().enumerate() {
            out[row] += value * component;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_clip(point: [f32; 3], quad: [f32; 2], viewport: [f32; 2]) -> [f32; 4] {
        let mv = quad_model_view(quad[0], quad[1]);
        let proj = orthographic_projection(viewport[0], viewport[1]);
        transform(&proj, transform(&mv, [point[0], point[1], point[2], 1.0]))
    }

    #[test]
    fn test_quad_corner_maps_to_pixel_extent() {
        let clip = to_clip([0.5, 0.5, 0.0], [300.0, 200.0], [600.0, 400.0]);
        assert!((clip[0] - 0.5).abs() < 1e-6);
        assert!((clip[1] - 0.5).abs() < 1e-6);
        assert_eq!(clip[3], 1.0);
    }

    #[test]
    fn test_quad_fills_matching_viewport() {
        let clip = to_clip([-0.5, -0.5, 0.0], [800.0, 600.0], [800.0, 600.0]);
        assert!((clip[0] + 1.0).abs() < 1e-6);
        assert!((clip[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_inside_clip_range() {
        let clip = to_clip([0.0, 0.0, 0.0], [300.0, 200.0], [600.0, 400.0]);
        assert!(clip[2] > 0.0 && clip[2] < 1.0, "depth {}", clip[2]);
    }

    #[test]
    fn test_degenerate_viewport_does_not_divide_by_zero() {
        let proj = orthographic_projection(0.0, 0.0);
        assert!(proj[0][0].is_finite());
        assert!(proj[1][1].is_finite());
    }
}
