//! Fixed-timestep frame clock.
//!
//! Accumulates variable frame times and runs the simulation at a fixed 60 Hz,
//! handing each step the simulation time as the animation clock.

use std::time::Duration;

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time accepted before clamping.
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug, Default)]
pub struct FrameClock {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `frame_time` seconds.
    ///
    /// `update_fn(now)` runs zero or more times, once per fixed step, with the
    /// simulation time at the start of that step.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(Duration)) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update_fn(Duration::from_secs_f64(self.total_sim_time));
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulation time elapsed so far.
    pub fn now(&self) -> Duration {
        Duration::from_secs_f64(self.total_sim_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_fixed_frame_runs_one_update() {
        let mut clock = FrameClock::new();
        let mut seen = Vec::new();
        clock.tick(FIXED_DT, |now| seen.push(now));
        assert_eq!(seen, vec![Duration::ZERO]);
        assert_eq!(clock.update_count(), 1);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_sixty_frames_make_one_second() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.tick(FIXED_DT, |_| {});
        }
        assert_eq!(clock.update_count(), 60);
        assert!((clock.now().as_secs_f64() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FrameClock::new();
        let mut updates = 0;
        clock.tick(FIXED_DT * 0.4, |_| updates += 1);
        assert_eq!(updates, 0, "a partial step must not update");
        assert!((clock.accumulator - FIXED_DT * 0.4).abs() < 1e-12);
        clock.tick(FIXED_DT * 0.7, |_| updates += 1);
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        let mut updates = 0;
        clock.tick(5.0, |_| updates += 1);
        assert!(
            (14..=15).contains(&updates),
            "0.25 s clamp should yield about 15 steps, got {updates}"
        );
    }

    #[test]
    fn test_update_times_increase() {
        let mut clock = FrameClock::new();
        let mut seen = Vec::new();
        clock.tick(FIXED_DT * 3.5, |now| seen.push(now));
        // 3.5 steps: three updates, half a step left over.
        assert_eq!(seen.len(), 3);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }
}
