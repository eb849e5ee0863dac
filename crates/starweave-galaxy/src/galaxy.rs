//! The galaxy aggregate: background field, custom stars, camera flights.

use std::collections::HashMap;
use std::time::Duration;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starweave_config::{AnimationConfig, CameraConfig, Config, ScaleConfig};
use tracing::{debug, info, warn};

use crate::activation::ActivationStrategy;
use crate::body::CelestialBody;
use crate::camera::{
    CameraFlyTo, CameraRig, FlightController, FlightStatus, FlightToken, approach_position,
};
use crate::custom_star::CustomStar;
use crate::error::GalaxyError;
use crate::placement::PositionGenerator;
use crate::record::{StarId, StarRecord};
use crate::scene::SceneHost;
use crate::star_type::StarType;

/// Owns every object in the galaxy and drives their per-frame updates.
///
/// Custom stars are only ever appended; `custom_index` is written solely by
/// [`add_custom_star`](Self::add_custom_star).
pub struct Galaxy {
    generator: PositionGenerator,
    haze_ratio: f32,
    haze_size_range: (f32, f32),
    scale: ScaleConfig,
    animation: AnimationConfig,
    camera: CameraConfig,
    rng: ChaCha8Rng,
    stars: Vec<CelestialBody>,
    haze: Vec<CelestialBody>,
    custom_stars: Vec<CustomStar>,
    custom_index: HashMap<StarId, usize>,
    flights: FlightController,
}

impl Galaxy {
    /// An empty galaxy. The RNG is seeded from `config.galaxy.seed` if set.
    pub fn new(config: &Config) -> Self {
        let seed = config.galaxy.seed.unwrap_or_else(rand::random);
        let (lo, hi) = (config.galaxy.haze_min_size, config.galaxy.haze_max_size);
        Self {
            generator: PositionGenerator::new(&config.galaxy),
            haze_ratio: config.galaxy.haze_ratio.max(0.0),
            haze_size_range: (lo.min(hi), lo.max(hi)),
            scale: config.scale.clone(),
            animation: config.animation.clone(),
            camera: config.camera.clone(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            stars: Vec::new(),
            haze: Vec::new(),
            custom_stars: Vec::new(),
            custom_index: HashMap::new(),
            flights: FlightController::new(),
        }
    }

    /// A galaxy with `star_count` background stars and matching haze.
    pub fn generate(config: &Config, star_count: usize) -> Self {
        let mut galaxy = Self::new(config);
        galaxy.populate_background(star_count);
        galaxy
    }

    /// Seed a galaxy from store records.
    ///
    /// The background is sized by [`background_star_count`] and every record
    /// becomes a custom star; malformed or duplicate records are skipped.
    pub fn from_records<I>(config: &Config, records: I) -> Self
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let records: Vec<StarRecord> = records.into_iter().collect();
        let mut galaxy = Self::generate(config, background_star_count(config, records.len()));

        let total = records.len();
        let skipped = galaxy.add_records(records);

        info!(
            stars = galaxy.stars.len(),
            haze = galaxy.haze.len(),
            custom = galaxy.custom_stars.len(),
            skipped,
            total,
            "galaxy seeded from store"
        );
        galaxy
    }

    /// Add every record as a custom star, skipping malformed or duplicate ones
    /// with a warning. Returns how many were skipped.
    pub fn add_records<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let mut skipped = 0;
        for record in records {
            if let Err(err) = self.add_custom_star(record) {
                warn!(%err, "skipping custom star");
                skipped += 1;
            }
        }
        skipped
    }

    /// Append `star_count` background stars and `star_count · haze_ratio`
    /// haze puffs, both placed by the bulk quota.
    pub fn populate_background(&mut self, star_count: usize) {
        let haze_count = (star_count as f32 * self.haze_ratio).round() as usize;

        let star_placements = self.generator.quota_placements(star_count, &mut self.rng);
        self.stars.reserve(star_count);
        for placement in star_placements {
            let star_type = StarType::sample(&mut self.rng);
            self.stars
                .push(CelestialBody::star(placement.position, star_type));
        }

        let haze_placements = self.generator.quota_placements(haze_count, &mut self.rng);
        let (lo, hi) = self.haze_size_range;
        self.haze.reserve(haze_count);
        for placement in haze_placements {
            let size = lo + self.rng.random::<f32>() * (hi - lo);
            self.haze.push(CelestialBody::haze(placement.position, size));
        }

        debug!(stars = star_count, haze = haze_count, "background populated");
    }

    /// Random-branch placement for a new user star.
    pub fn random_position(&mut self) -> Vec3 {
        self.generator.random_position(&mut self.rng)
    }

    /// Weighted spectral type for a new user star.
    pub fn random_star_type(&mut self) -> StarType {
        StarType::sample(&mut self.rng)
    }

    /// Build and index a custom star from a store record.
    pub fn add_custom_star(&mut self, record: StarRecord) -> Result<StarId, GalaxyError> {
        if self.custom_index.contains_key(&record.id) {
            return Err(GalaxyError::DuplicateStar(record.id));
        }
        let star = CustomStar::from_record(record)?;
        let id = star.id().clone();
        self.custom_index.insert(id.clone(), self.custom_stars.len());
        self.custom_stars.push(star);
        debug!(star = %id, "custom star added");
        Ok(id)
    }

    pub fn custom_star(&self, id: &StarId) -> Option<&CustomStar> {
        self.custom_index.get(id).map(|&i| &self.custom_stars[i])
    }

    fn custom_star_mut(&mut self, id: &StarId) -> Option<&mut CustomStar> {
        let index = *self.custom_index.get(id)?;
        self.custom_stars.get_mut(index)
    }

    /// Display payload of a custom star.
    pub fn star_details(&self, id: &StarId) -> Option<&StarRecord> {
        self.custom_star(id).map(CustomStar::record)
    }

    /// Start the configured activation animation on a star.
    /// Returns `false` (and does nothing) for unknown ids.
    pub fn animate_new_star(&mut self, id: &StarId, now: Duration) -> bool {
        let strategy = ActivationStrategy::from_config(&self.animation);
        match self.custom_star_mut(id) {
            Some(star) => {
                star.activate(strategy, now);
                true
            }
            None => {
                debug!(star = %id, "animate: no such star");
                false
            }
        }
    }

    /// Fly the camera to a star and activate it.
    ///
    /// The camera stops `approach_distance` from the star on the current
    /// camera→star line and ends up looking at the star. Any flight already in
    /// progress is superseded. Returns `None` for unknown ids.
    pub fn navigate_to_star(
        &mut self,
        id: &StarId,
        rig: &CameraRig,
        now: Duration,
    ) -> Option<FlightToken> {
        let Some(star_position) = self.custom_star(id).map(CustomStar::position) else {
            debug!(star = %id, "navigate: no such star");
            return None;
        };

        let destination = CameraRig::new(
            approach_position(rig.position, star_position, self.camera.approach_distance),
            star_position,
        );
        let duration = Duration::from_millis(self.camera.fly_duration_ms);
        let token = self
            .flights
            .start(CameraFlyTo::new(*rig, destination, now, duration));

        self.animate_new_star(id, now);
        info!(star = %id, "navigating to star");
        Some(token)
    }

    /// Cancel a flight. `false` if it already finished or was superseded.
    pub fn cancel_flight(&mut self, token: FlightToken) -> bool {
        self.flights.cancel(token)
    }

    pub fn is_flying(&self) -> bool {
        self.flights.is_flying()
    }

    pub fn active_flight(&self) -> Option<(FlightToken, &CameraFlyTo)> {
        self.flights.active()
    }

    /// Advance the active camera flight, if any.
    pub fn tick_camera(&mut self, rig: &mut CameraRig, now: Duration) -> Option<FlightStatus> {
        self.flights.tick(rig, now)
    }

    /// Per-frame object update.
    ///
    /// Background stars and haze are scaled first, then custom stars are
    /// scaled and animated.
    pub fn update(&mut self, camera: Vec3, now: Duration) {
        for star in &mut self.stars {
            star.update_scale(camera, &self.scale);
        }
        for haze in &mut self.haze {
            haze.update_scale(camera, &self.scale);
        }
        for star in &mut self.custom_stars {
            star.update(camera, &self.scale, now);
        }
    }

    /// Insert every not-yet-materialized object into `scene`.
    pub fn materialize<S: SceneHost + ?Sized>(&mut self, scene: &mut S) {
        for body in self.stars.iter_mut().chain(self.haze.iter_mut()) {
            body.materialize(scene);
        }
        for star in &mut self.custom_stars {
            star.body_mut().materialize(scene);
        }
    }

    /// Push every materialized object's appearance to `scene`.
    pub fn sync_scene<S: SceneHost + ?Sized>(&self, scene: &mut S) {
        for body in self.stars.iter().chain(self.haze.iter()) {
            body.sync(scene);
        }
        for star in &self.custom_stars {
            star.body().sync(scene);
        }
    }

    /// One full frame: camera flight, object updates, scene sync.
    pub fn frame<S: SceneHost + ?Sized>(
        &mut self,
        rig: &mut CameraRig,
        scene: &mut S,
        now: Duration,
    ) -> Option<FlightStatus> {
        let status = self.tick_camera(rig, now);
        self.update(rig.position, now);
        self.materialize(scene);
        self.sync_scene(scene);
        status
    }

    pub fn stars(&self) -> &[CelestialBody] {
        &self.stars
    }

    pub fn haze(&self) -> &[CelestialBody] {
        &self.haze
    }

    pub fn custom_stars(&self) -> &[CustomStar] {
        &self.custom_stars
    }

    /// Custom stars currently playing an activation animation.
    pub fn animating_count(&self) -> usize {
        self.custom_stars.iter().filter(|s| s.is_animating()).count()
    }
}

/// Background star count for a store holding `custom_count` stars.
///
/// An empty store gets `default_star_count`; otherwise
/// `max(min_background_stars, custom_count · stars_per_custom_star)`.
pub fn background_star_count(config: &Config, custom_count: usize) -> usize {
    let galaxy = &config.galaxy;
    if custom_count == 0 {
        return galaxy.default_star_count as usize;
    }
    (custom_count.saturating_mul(galaxy.stars_per_custom_star as usize))
        .max(galaxy.min_background_stars as usize)
}
