//! Spiral arm projection.

use glam::Vec3;

/// Winds a point in the galactic plane around the origin.
///
/// ```text
/// r = sqrt(x² + y²)
/// θ = arm_offset + atan2(y, x) + (r / radius_unit) · twist
/// (x, y, z) -> (r·cos θ, r·sin θ, z)
/// ```
///
/// The twist grows linearly with radius, so with the default winding
/// (`twist = 3`, `radius_unit = 100`) an arm sample at the mean radius is
/// rotated roughly 6.7 radians. Distance from the center and `z` are preserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralProjector {
    radius_unit: f32,
    twist: f32,
}

impl SpiralProjector {
    /// Create a projector. `radius_unit` is clamped to a small positive value.
    pub fn new(radius_unit: f32, twist: f32) -> Self {
        Self {
            radius_unit: radius_unit.abs().max(f32::EPSILON),
            twist,
        }
    }

    /// Rotation applied at radius `r`, excluding the arm offset.
    pub fn winding_at(&self, r: f32) -> f32 {
        (r / self.radius_unit) * self.twist
    }

    /// Project `(x, y, z)` onto the arm rotated by `arm_offset` radians.
    pub fn project(&self, x: f32, y: f32, z: f32, arm_offset: f32) -> Vec3 {
        let r = x.hypot(y);
        let theta = arm_offset + y.atan2(x) + self.winding_at(r);
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn projector() -> SpiralProjector {
        SpiralProjector::new(100.0, 3.0)
    }

    #[test]
    fn test_reference_output() {
        let p = projector().project(100.0, 0.0, 5.0, 0.0);
        let expected = Vec3::new(100.0 * 3.0_f32.cos(), 100.0 * 3.0_f32.sin(), 5.0);
        assert!((p - expected).length() < 1e-4, "got {p:?}, expected {expected:?}");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = projector().project(200.0, 100.0, -2.0, 1.2);
        let b = projector().project(200.0, 100.0, -2.0, 1.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_radius_and_height_preserved() {
        let (x, y, z) = (180.0, 95.0, 3.0);
        let p = projector().project(x, y, z, 0.7);
        let r_in = (x * x + y * y).sqrt();
        let r_out = (p.x * p.x + p.y * p.y).sqrt();
        assert!((r_in - r_out).abs() < 1e-3);
        assert_eq!(p.z, z);
    }

    #[test]
    fn test_opposite_arm_is_point_reflection() {
        let a = projector().project(150.0, 80.0, 1.0, 0.0);
        let b = projector().project(150.0, 80.0, 1.0, PI);
        assert!((a.x + b.x).abs() < 1e-3);
        assert!((a.y + b.y).abs() < 1e-3);
    }

    #[test]
    fn test_origin_stays_at_origin() {
        let p = projector().project(0.0, 0.0, 4.0, 2.0);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert_eq!(p.z, 4.0);
    }

    #[test]
    fn test_winding_increases_with_radius() {
        let proj = projector();
        let mut last = proj.winding_at(0.0);
        for r in 1..500 {
            let w = proj.winding_at(r as f32);
            assert!(w > last, "winding must grow with radius");
            last = w;
        }
    }

    #[test]
    fn test_zero_radius_unit_is_clamped() {
        let p = SpiralProjector::new(0.0, 3.0).project(1.0, 1.0, 0.0, 0.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
