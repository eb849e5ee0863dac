//! User-submitted stars.

use std::time::Duration;

use glam::Vec3;
use starweave_config::ScaleConfig;
use tracing::warn;

use crate::activation::{ActivationStrategy, ActiveAnimation, RestState};
use crate::body::CelestialBody;
use crate::error::GalaxyError;
use crate::record::{StarId, StarRecord};
use crate::star_type::{StarType, color_from_hex};

/// Size used when a record carries none (or a non-positive one).
const FALLBACK_SIZE: f32 = 1.0;

/// A custom star: a celestial body plus its store record and an optional
/// running activation animation.
#[derive(Clone, Debug)]
pub struct CustomStar {
    record: StarRecord,
    body: CelestialBody,
    animation: Option<ActiveAnimation>,
}

impl CustomStar {
    /// Build a custom star from a store record.
    ///
    /// Fails with [`GalaxyError::MalformedRecord`] when a position component is
    /// missing. An unreadable color falls back to the G-type tint.
    pub fn from_record(record: StarRecord) -> Result<Self, GalaxyError> {
        let position = record.position()?;

        let color = match record.color_hex.as_deref() {
            Some(hex) => color_from_hex(hex).unwrap_or_else(|| {
                warn!(star = %record.id, color = hex, "unreadable star color, using default");
                StarType::G.color()
            }),
            None => StarType::G.color(),
        };
        let size = record
            .size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(FALLBACK_SIZE);

        Ok(Self {
            body: CelestialBody::custom(position, color, size),
            record,
            animation: None,
        })
    }

    pub fn id(&self) -> &StarId {
        &self.record.id
    }

    pub fn record(&self) -> &StarRecord {
        &self.record
    }

    pub fn body(&self) -> &CelestialBody {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut CelestialBody {
        &mut self.body
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&ActiveAnimation> {
        self.animation.as_ref()
    }

    /// Start (or restart) the activation animation at `now`.
    ///
    /// A restart keeps the rest state captured by the first activation so an
    /// interrupted glow never becomes the new base color.
    pub fn activate(&mut self, strategy: ActivationStrategy, now: Duration) {
        let rest = match &self.animation {
            Some(active) => *active.rest(),
            None => RestState::capture(self.body.appearance()),
        };
        self.animation = Some(ActiveAnimation::new(strategy, now, rest));
    }

    /// Advance the running animation. Returns `true` while it is still active.
    pub fn update_animation(&mut self, now: Duration) -> bool {
        let Some(active) = self.animation else {
            return false;
        };
        let running = active.apply(self.body.appearance_mut(), now);
        if !running {
            self.animation = None;
        }
        running
    }

    /// Per-frame update: distance scaling, then animation.
    pub fn update(&mut self, camera: Vec3, scale: &ScaleConfig, now: Duration) {
        self.body.update_scale(camera, scale);
        self.update_animation(now);
    }
}
