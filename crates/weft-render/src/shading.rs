//! 2D lighting approximation.
//!
//! Not a real surface normal: the cross product of two triangle edges is
//! folded into the x component of a pseudo-normal whose y component is 1.
//! The y component of the normalized pseudo-normal is the ink opacity.

use weft_types::Vec2;

/// `u.y * v.x - u.x * v.y` for `u = b - a`, `v = c - a`.
#[inline]
pub fn edge_cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let u = b - a;
    let v = c - a;
    u.y * v.x - u.x * v.y
}

/// Pseudo-normal `(cross * tilt, 1)`.
#[inline]
pub fn pseudo_normal(a: Vec2, b: Vec2, c: Vec2, tilt: f32) -> Vec2 {
    Vec2::new(edge_cross(a, b, c) * tilt, 1.0)
}

/// Opacity in 0..=1 from a pseudo-normal.
///
/// Zero-length or non-finite normals fall back to straight up (full ink).
#[inline]
pub fn shading(normal: Vec2) -> f32 {
    let y = normal.try_normalize().unwrap_or(Vec2::Y).y;
    if y.is_nan() {
        return 1.0;
    }
    y.clamp(0.0, 1.0)
}

/// Opacity for a triangle.
#[inline]
pub fn triangle_shading(a: Vec2, b: Vec2, c: Vec2, tilt: f32) -> f32 {
    shading(pseudo_normal(a, b, c, tilt))
}

/// Opacity for a line, using its midpoint as the third vertex.
#[inline]
pub fn line_shading(a: Vec2, b: Vec2, tilt: f32) -> f32 {
    triangle_shading(a, b, (a + b) * 0.5, tilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tilt_is_full_ink() {
        let s = triangle_shading(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), 0.0);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn tilt_darkens_by_area() {
        let a = Vec2::ZERO;
        let s_small = triangle_shading(a, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.01);
        let s_big = triangle_shading(a, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), 0.01);
        assert!(s_big < s_small);
        assert!((s_big - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn lines_are_collinear_so_full_ink() {
        assert_eq!(line_shading(Vec2::ZERO, Vec2::new(3.0, 7.0), 5.0), 1.0);
    }

    #[test]
    fn nan_falls_back() {
        assert_eq!(shading(Vec2::new(f32::NAN, 1.0)), 1.0);
    }
}
