//! Celestial objects: a fixed position, a base look, and a per-frame
//! appearance derived from the camera distance.

use glam::Vec3;
use starweave_config::ScaleConfig;

use crate::scene::{RenderHandle, SceneHost, Sprite};
use crate::star_type::{HAZE_COLOR_HEX, StarType, rgb_from_u32};

/// What a body is drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Background star. Size shrinks with distance.
    Star,
    /// Haze puff. Opacity fades with distance.
    Haze,
    /// User-submitted star. Scales like a background star.
    Custom,
}

/// Visual state pushed to the scene host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Linear RGB color (may exceed 1.0 while glowing).
    pub color: Vec3,
    /// Emissive RGB added on top of the color.
    pub emissive: Vec3,
    /// Sprite size in scene units.
    pub size: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Appearance {
    /// A non-emissive appearance.
    pub fn new(color: Vec3, size: f32, opacity: f32) -> Self {
        Self {
            color,
            emissive: Vec3::ZERO,
            size,
            opacity,
        }
    }
}

/// Star sprite size at `distance` from the camera.
///
/// `base_size · reference_distance / distance`, clamped to
/// `[star_min_size, star_max_size]`. Zero distance yields the upper bound.
pub fn star_size_at(base_size: f32, distance: f32, scale: &ScaleConfig) -> f32 {
    let size = if distance > f32::EPSILON {
        base_size * scale.reference_distance / distance
    } else {
        scale.star_max_size
    };
    clamp_floor(size, scale.star_min_size, scale.star_max_size)
}

/// Haze opacity at `distance` from the camera.
///
/// `haze_max_opacity · reference_distance / distance`, clamped to
/// `[haze_min_opacity, haze_max_opacity]`.
pub fn haze_opacity_at(distance: f32, scale: &ScaleConfig) -> f32 {
    let opacity = if distance > f32::EPSILON {
        scale.haze_max_opacity * scale.reference_distance / distance
    } else {
        scale.haze_max_opacity
    };
    clamp_floor(opacity, scale.haze_min_opacity, scale.haze_max_opacity)
}

// The floor wins if the bounds are misconfigured; NaN collapses to the floor.
fn clamp_floor(value: f32, min: f32, max: f32) -> f32 {
    let min = min.max(0.0);
    let value = if value.is_nan() { min } else { value.min(max) };
    value.max(min)
}

/// A point object in the galaxy.
///
/// The render handle stays `None` until [`materialize`](Self::materialize)
/// is called.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    kind: BodyKind,
    position: Vec3,
    base_size: f32,
    appearance: Appearance,
    handle: Option<RenderHandle>,
}

impl CelestialBody {
    /// A background star of the given spectral type.
    pub fn star(position: Vec3, star_type: StarType) -> Self {
        Self::new(
            BodyKind::Star,
            position,
            Appearance::new(star_type.color(), star_type.base_size(), 1.0),
        )
    }

    /// A haze puff of the given base size.
    pub fn haze(position: Vec3, size: f32) -> Self {
        Self::new(
            BodyKind::Haze,
            position,
            Appearance::new(rgb_from_u32(HAZE_COLOR_HEX), size, 0.0),
        )
    }

    /// A user star with an explicit color and size.
    pub fn custom(position: Vec3, color: Vec3, size: f32) -> Self {
        Self::new(BodyKind::Custom, position, Appearance::new(color, size, 1.0))
    }

    fn new(kind: BodyKind, position: Vec3, appearance: Appearance) -> Self {
        Self {
            kind,
            position,
            base_size: appearance.size,
            appearance,
            handle: None,
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub(crate) fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    pub fn handle(&self) -> Option<RenderHandle> {
        self.handle
    }

    pub fn is_materialized(&self) -> bool {
        self.handle.is_some()
    }

    /// Insert this body into `scene`. Calling it again returns the same handle.
    pub fn materialize<S: SceneHost + ?Sized>(&mut self, scene: &mut S) -> RenderHandle {
        if let Some(handle) = self.handle {
            return handle;
        }
        let handle = scene.spawn(Sprite {
            kind: self.kind,
            position: self.position,
            appearance: self.appearance,
        });
        self.handle = Some(handle);
        handle
    }

    /// Recompute the distance-dependent part of the appearance.
    ///
    /// Stars and custom stars change size; haze changes opacity. The result
    /// depends only on the two positions.
    pub fn update_scale(&mut self, camera: Vec3, scale: &ScaleConfig) {
        let distance = self.position.distance(camera);
        match self.kind {
            BodyKind::Star | BodyKind::Custom => {
                self.appearance.size = star_size_at(self.base_size, distance, scale);
            }
            BodyKind::Haze => {
                self.appearance.opacity = haze_opacity_at(distance, scale);
            }
        }
    }

    /// Push the current appearance to the scene, if materialized.
    pub fn sync<S: SceneHost + ?Sized>(&self, scene: &mut S) {
        if let Some(handle) = self.handle {
            scene.update(handle, &self.appearance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;

    fn scale() -> ScaleConfig {
        ScaleConfig::default()
    }

    #[test]
    fn test_star_size_decreases_with_distance() {
        let scale = scale();
        let mut last = f32::INFINITY;
        for d in (0..5000).step_by(10) {
            let size = star_size_at(1.15, d as f32, &scale);
            assert!(size <= last, "size grew from {last} to {size} at distance {d}");
            assert!(size >= scale.star_min_size);
            assert!(size <= scale.star_max_size);
            last = size;
        }
    }

    #[test]
    fn test_star_size_at_reference_distance_is_base() {
        let scale = scale();
        let size = star_size_at(1.15, scale.reference_distance, &scale);
        assert!((size - 1.15).abs() < 1e-6);
    }

    #[test]
    fn test_far_star_keeps_visibility_floor() {
        let scale = scale();
        assert_eq!(star_size_at(0.7, 1.0e9, &scale), scale.star_min_size);
        assert_eq!(haze_opacity_at(1.0e9, &scale), scale.haze_min_opacity);
    }

    #[test]
    fn test_zero_distance_is_upper_bound() {
        let scale = scale();
        assert_eq!(star_size_at(0.7, 0.0, &scale), scale.star_max_size);
        assert_eq!(haze_opacity_at(0.0, &scale), scale.haze_max_opacity);
    }

    #[test]
    fn test_haze_opacity_decreases_with_distance() {
        let scale = scale();
        let near = haze_opacity_at(100.0, &scale);
        let far = haze_opacity_at(2000.0, &scale);
        assert!(near >= far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_misconfigured_bounds_never_go_negative() {
        let scale = ScaleConfig {
            star_min_size: -1.0,
            star_max_size: -2.0,
            ..ScaleConfig::default()
        };
        assert!(star_size_at(1.0, 10.0, &scale) >= 0.0);
    }

    #[test]
    fn test_update_scale_is_idempotent() {
        let scale = scale();
        let mut body = CelestialBody::star(Vec3::new(10.0, 0.0, 0.0), StarType::G);
        let camera = Vec3::new(0.0, 300.0, 300.0);
        body.update_scale(camera, &scale);
        let first = *body.appearance();
        body.update_scale(camera, &scale);
        assert_eq!(first, *body.appearance());
    }

    #[test]
    fn test_haze_scale_leaves_size_alone() {
        let scale = scale();
        let mut haze = CelestialBody::haze(Vec3::ZERO, 6.0);
        haze.update_scale(Vec3::new(0.0, 0.0, 400.0), &scale);
        assert_eq!(haze.appearance().size, 6.0);
        assert!(haze.appearance().opacity > 0.0);
    }

    #[test]
    fn test_materialize_is_lazy_and_idempotent() {
        let mut scene = HeadlessScene::new();
        let mut body = CelestialBody::star(Vec3::ONE, StarType::M);
        assert!(!body.is_materialized());
        let first = body.materialize(&mut scene);
        let second = body.materialize(&mut scene);
        assert_eq!(first, second);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_sync_requires_materialization() {
        let mut scene = HeadlessScene::new();
        let mut body = CelestialBody::star(Vec3::ONE, StarType::M);
        body.sync(&mut scene);
        assert_eq!(scene.update_count(), 0);

        body.materialize(&mut scene);
        body.update_scale(Vec3::new(0.0, 0.0, 1000.0), &scale());
        body.sync(&mut scene);
        let handle = body.handle().unwrap();
        assert_eq!(scene.get(handle).unwrap().appearance, *body.appearance());
    }
}
