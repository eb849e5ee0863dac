//! Camera fly-to: eased interpolation of camera position and orbit target,
//! driven by an explicit per-frame tick.

use std::time::Duration;

use glam::Vec3;

/// Camera position plus the point an orbit controller looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// Cubic ease-in-out: `4t³` below one half, `1 - (-2t + 2)³ / 2` above.
/// Input is clamped to `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Where the camera should stop to look at `star` from `distance` away,
/// keeping the current camera→star line.
///
/// If the camera sits on the star the approach is taken along +Z.
pub fn approach_position(camera: Vec3, star: Vec3, distance: f32) -> Vec3 {
    let direction = (camera - star).normalize_or(Vec3::Z);
    star + direction * distance
}

/// Whether a flight is still moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightStatus {
    Flying,
    Arrived,
}

/// One camera flight between two rig states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFlyTo {
    from: CameraRig,
    to: CameraRig,
    started: Duration,
    duration: Duration,
}

impl CameraFlyTo {
    /// Fly from `from` to `to`, starting at `started`.
    pub fn new(from: CameraRig, to: CameraRig, started: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn from(&self) -> &CameraRig {
        &self.from
    }

    pub fn to(&self) -> &CameraRig {
        &self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]` at `now`. A zero duration is complete
    /// immediately.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Rig state at `now`. Exactly the target once progress reaches 1.
    pub fn sample(&self, now: Duration) -> CameraRig {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = ease_in_out_cubic(progress);
        CameraRig {
            position: self.from.position.lerp(self.to.position, eased),
            target: self.from.target.lerp(self.to.target, eased),
        }
    }

    /// Write the rig state at `now` into `rig`.
    pub fn apply(&self, rig: &mut CameraRig, now: Duration) -> FlightStatus {
        *rig = self.sample(now);
        if self.progress(now) >= 1.0 {
            FlightStatus::Arrived
        } else {
            FlightStatus::Flying
        }
    }
}

/// Identifies one started flight. Tokens are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlightToken(u64);

/// Owns the single authoritative camera flight.
///
/// Starting a flight supersedes whatever was in flight; the superseded token
/// can no longer cancel anything.
#[derive(Debug, Default)]
pub struct FlightController {
    generation: u64,
    active: Option<(FlightToken, CameraFlyTo)>,
}

impl FlightController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `flight` the active flight.
    pub fn start(&mut self, flight: CameraFlyTo) -> FlightToken {
        self.generation += 1;
        let token = FlightToken(self.generation);
        self.active = Some((token, flight));
        token
    }

    /// Cancel the flight started with `token`. Returns `false` if it already
    /// finished or was superseded.
    pub fn cancel(&mut self, token: FlightToken) -> bool {
        match self.active {
            Some((active, _)) if active == token => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_flying(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<(FlightToken, &CameraFlyTo)> {
        self.active.as_ref().map(|(token, flight)| (*token, flight))
    }

    /// Advance the active flight. `None` when nothing is in flight.
    pub fn tick(&mut self, rig: &mut CameraRig, now: Duration) -> Option<FlightStatus> {
        let (_, flight) = self.active.as_ref()?;
        let status = flight.apply(rig, now);
        if status == FlightStatus::Arrived {
            self.active = None;
        }
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SECONDS: Duration = Duration::from_millis(2000);

    fn rig_a() -> CameraRig {
        CameraRig::new(Vec3::new(0.0, 500.0, 500.0), Vec3::ZERO)
    }

    fn rig_b() -> CameraRig {
        CameraRig::new(Vec3::new(10.3, -7.1, 33.3), Vec3::new(1.0, 2.0, 3.0))
    }

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut last = ease_in_out_cubic(0.0);
        for i in 1..=1000 {
            let value = ease_in_out_cubic(i as f32 / 1000.0);
            assert!(value >= last, "ease decreased at {i}: {last} -> {value}");
            last = value;
        }
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn test_flight_starts_at_origin_state() {
        let flight = CameraFlyTo::new(rig_a(), rig_b(), Duration::from_secs(1), TWO_SECONDS);
        assert_eq!(flight.sample(Duration::from_secs(1)), rig_a());
    }

    #[test]
    fn test_flight_lands_exactly_on_target() {
        let flight = CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, TWO_SECONDS);
        assert_eq!(flight.sample(TWO_SECONDS), rig_b());
        assert_eq!(flight.sample(Duration::from_secs(90)), rig_b());
    }

    #[test]
    fn test_flight_midpoint_is_halfway() {
        let flight = CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, TWO_SECONDS);
        let mid = flight.sample(Duration::from_millis(1000));
        let expected = rig_a().position.lerp(rig_b().position, 0.5);
        assert!((mid.position - expected).length() < 1e-4);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let flight = CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, Duration::ZERO);
        let mut rig = rig_a();
        assert_eq!(flight.apply(&mut rig, Duration::ZERO), FlightStatus::Arrived);
        assert_eq!(rig, rig_b());
    }

    #[test]
    fn test_controller_finishes_and_clears() {
        let mut controller = FlightController::new();
        let mut rig = rig_a();
        controller.start(CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, TWO_SECONDS));

        assert_eq!(
            controller.tick(&mut rig, Duration::from_millis(500)),
            Some(FlightStatus::Flying)
        );
        assert_eq!(
            controller.tick(&mut rig, Duration::from_millis(2100)),
            Some(FlightStatus::Arrived)
        );
        assert_eq!(rig, rig_b());
        assert!(!controller.is_flying());
        assert_eq!(controller.tick(&mut rig, Duration::from_secs(3)), None);
    }

    #[test]
    fn test_new_flight_supersedes_old_one() {
        let mut controller = FlightController::new();
        let first = controller.start(CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, TWO_SECONDS));
        let other = CameraRig::new(Vec3::new(-50.0, 0.0, 0.0), Vec3::X);
        let second =
            controller.start(CameraFlyTo::new(rig_a(), other, Duration::ZERO, TWO_SECONDS));
        assert_ne!(first, second);

        assert!(!controller.cancel(first), "superseded token must not cancel");
        let mut rig = rig_a();
        controller.tick(&mut rig, TWO_SECONDS);
        assert_eq!(rig, other);
    }

    #[test]
    fn test_cancel_stops_flight() {
        let mut controller = FlightController::new();
        let token = controller.start(CameraFlyTo::new(rig_a(), rig_b(), Duration::ZERO, TWO_SECONDS));
        assert!(controller.cancel(token));
        assert!(!controller.cancel(token));

        let mut rig = rig_a();
        assert_eq!(controller.tick(&mut rig, Duration::from_millis(500)), None);
        assert_eq!(rig, rig_a());
    }

    #[test]
    fn test_approach_keeps_line_and_distance() {
        let star = Vec3::new(1.0, 2.0, 3.0);
        let camera = Vec3::new(1.0, 2.0, 503.0);
        let stop = approach_position(camera, star, 15.0);
        assert!((stop.distance(star) - 15.0).abs() < 1e-4);
        assert!((stop - Vec3::new(1.0, 2.0, 18.0)).length() < 1e-4);
    }

    #[test]
    fn test_approach_from_star_itself_uses_fallback_axis() {
        let star = Vec3::new(4.0, 4.0, 4.0);
        let stop = approach_position(star, star, 15.0);
        assert_eq!(stop, Vec3::new(4.0, 4.0, 19.0));
    }
}
