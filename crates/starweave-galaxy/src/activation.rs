//! Custom star activation animations.
//!
//! Two strategies share the [`ActivatableAnimation`] contract: a blink that
//! pulses opacity until a cutoff, and a glow that ramps brightness up and back
//! down. Both are pure functions of the time elapsed since activation, so the
//! visible result does not depend on how many frames were rendered.

use std::time::Duration;

use glam::Vec3;
use starweave_config::{ActivationStyle, AnimationConfig};

use crate::body::Appearance;

/// Visual override produced by a running animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    /// Opacity to display.
    pub opacity: f32,
    /// Multiplier applied to the rest color.
    pub brightness: f32,
    /// Emissive intensity as a multiple of the rest color. `None` keeps the
    /// rest emissive.
    pub emissive: Option<f32>,
}

/// Outcome of sampling an animation at some elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStep {
    Running(Pulse),
    Finished,
}

/// A time-bounded visual transition on a custom star.
pub trait ActivatableAnimation {
    /// Length of the animation.
    fn duration(&self) -> Duration;

    /// Visual state `elapsed` after activation.
    fn sample(&self, elapsed: Duration) -> AnimationStep;
}

/// Opacity oscillation: `min + (1 - min)·|sin(elapsed · frequency · π)|`,
/// running while `elapsed <= duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkAnimation {
    pub duration: Duration,
    pub frequency: f32,
    pub min_opacity: f32,
}

impl BlinkAnimation {
    /// Opacity at `elapsed` seconds, ignoring the cutoff.
    pub fn opacity_at(&self, elapsed: f32) -> f32 {
        let min = self.min_opacity.clamp(0.0, 1.0);
        min + (1.0 - min) * (elapsed * self.frequency * std::f32::consts::PI).sin().abs()
    }
}

impl Default for BlinkAnimation {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            frequency: 4.0,
            min_opacity: 0.3,
        }
    }
}

impl ActivatableAnimation for BlinkAnimation {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> AnimationStep {
        if elapsed > self.duration {
            return AnimationStep::Finished;
        }
        AnimationStep::Running(Pulse {
            opacity: self.opacity_at(elapsed.as_secs_f32()),
            brightness: 1.0,
            emissive: None,
        })
    }
}

/// Brightness ramp: linear from 1 to `peak` over the first half of the
/// window, back to 1 over the second half. Emissive tracks half the
/// multiplier. Finished once `elapsed >= duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowAnimation {
    pub duration: Duration,
    pub peak: f32,
}

impl GlowAnimation {
    /// Brightness multiplier at `elapsed`, ignoring the cutoff.
    pub fn brightness_at(&self, elapsed: Duration) -> f32 {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        let t = (elapsed.as_secs_f32() / total).clamp(0.0, 1.0);
        let ramp = if t < 0.5 { t / 0.5 } else { (1.0 - t) / 0.5 };
        1.0 + (self.peak - 1.0) * ramp
    }
}

impl Default for GlowAnimation {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(3),
            peak: 3.0,
        }
    }
}

impl ActivatableAnimation for GlowAnimation {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> AnimationStep {
        if elapsed >= self.duration {
            return AnimationStep::Finished;
        }
        let brightness = self.brightness_at(elapsed);
        AnimationStep::Running(Pulse {
            opacity: 1.0,
            brightness,
            emissive: Some(brightness * 0.5),
        })
    }
}

/// The configured animation strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivationStrategy {
    Blink(BlinkAnimation),
    Glow(GlowAnimation),
}

impl ActivationStrategy {
    /// Build the strategy selected by `config.style`.
    pub fn from_config(config: &AnimationConfig) -> Self {
        match config.style {
            ActivationStyle::Blink => Self::Blink(BlinkAnimation {
                duration: secs(config.blink_duration_secs),
                frequency: config.blink_frequency,
                min_opacity: config.blink_min_opacity,
            }),
            ActivationStyle::Glow => Self::Glow(GlowAnimation {
                duration: secs(config.glow_duration_secs),
                peak: config.glow_peak,
            }),
        }
    }

    pub fn style(&self) -> ActivationStyle {
        match self {
            Self::Blink(_) => ActivationStyle::Blink,
            Self::Glow(_) => ActivationStyle::Glow,
        }
    }
}

impl ActivatableAnimation for ActivationStrategy {
    fn duration(&self) -> Duration {
        match self {
            Self::Blink(blink) => blink.duration(),
            Self::Glow(glow) => glow.duration(),
        }
    }

    fn sample(&self, elapsed: Duration) -> AnimationStep {
        match self {
            Self::Blink(blink) => blink.sample(elapsed),
            Self::Glow(glow) => glow.sample(elapsed),
        }
    }
}

fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

/// Appearance values captured when an animation starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestState {
    pub color: Vec3,
    pub emissive: Vec3,
    pub opacity: f32,
}

impl RestState {
    pub fn capture(appearance: &Appearance) -> Self {
        Self {
            color: appearance.color,
            emissive: appearance.emissive,
            opacity: appearance.opacity,
        }
    }
}

/// A running animation on one custom star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveAnimation {
    strategy: ActivationStrategy,
    started: Duration,
    rest: RestState,
}

impl ActiveAnimation {
    pub fn new(strategy: ActivationStrategy, started: Duration, rest: RestState) -> Self {
        Self {
            strategy,
            started,
            rest,
        }
    }

    pub fn strategy(&self) -> &ActivationStrategy {
        &self.strategy
    }

    pub fn started(&self) -> Duration {
        self.started
    }

    pub fn rest(&self) -> &RestState {
        &self.rest
    }

    /// Apply the visual state at `now` to `appearance`.
    ///
    /// Returns `false` once the animation has finished; the appearance is then
    /// back at its rest state (blink additionally forces full opacity).
    pub fn apply(&self, appearance: &mut Appearance, now: Duration) -> bool {
        let elapsed = now.saturating_sub(self.started);
        match self.strategy.sample(elapsed) {
            AnimationStep::Running(pulse) => {
                appearance.opacity = pulse.opacity;
                appearance.color = self.rest.color * pulse.brightness;
                appearance.emissive = match pulse.emissive {
                    Some(intensity) => self.rest.color * intensity,
                    None => self.rest.emissive,
                };
                true
            }
            AnimationStep::Finished => {
                appearance.color = self.rest.color;
                appearance.emissive = self.rest.emissive;
                appearance.opacity = match self.strategy {
                    ActivationStrategy::Blink(_) => 1.0,
                    ActivationStrategy::Glow(_) => self.rest.opacity,
                };
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn opacity(step: AnimationStep) -> f32 {
        match step {
            AnimationStep::Running(pulse) => pulse.opacity,
            AnimationStep::Finished => panic!("animation unexpectedly finished"),
        }
    }

    fn brightness(step: AnimationStep) -> f32 {
        match step {
            AnimationStep::Running(pulse) => pulse.brightness,
            AnimationStep::Finished => panic!("animation unexpectedly finished"),
        }
    }

    #[test]
    fn test_blink_starts_at_trough() {
        let blink = BlinkAnimation::default();
        assert!((opacity(blink.sample(Duration::ZERO)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_blink_opacity_stays_in_range() {
        let blink = BlinkAnimation::default();
        for step in 0..=5000 {
            let o = opacity(blink.sample(ms(step)));
            assert!(
                (0.3 - 1e-6..=1.0 + 1e-6).contains(&o),
                "opacity {o} out of range at {step}ms"
            );
        }
    }

    #[test]
    fn test_blink_peaks_at_quarter_period() {
        let blink = BlinkAnimation::default();
        // sin(0.125 · 4 · π) = sin(π/2) = 1
        assert!((opacity(blink.sample(ms(125))) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_blink_finishes_after_cutoff() {
        let blink = BlinkAnimation::default();
        assert!(matches!(blink.sample(ms(5000)), AnimationStep::Running(_)));
        assert_eq!(blink.sample(ms(5001)), AnimationStep::Finished);
        assert_eq!(blink.sample(Duration::from_secs(60)), AnimationStep::Finished);
    }

    #[test]
    fn test_glow_ramp_shape() {
        let glow = GlowAnimation::default();
        assert!((brightness(glow.sample(Duration::ZERO)) - 1.0).abs() < 1e-6);
        assert!((brightness(glow.sample(ms(750))) - 2.0).abs() < 1e-5);
        assert!((brightness(glow.sample(ms(1500))) - 3.0).abs() < 1e-6);
        assert!((brightness(glow.sample(ms(2250))) - 2.0).abs() < 1e-5);
        assert_eq!(glow.sample(ms(3000)), AnimationStep::Finished);
    }

    #[test]
    fn test_glow_emissive_is_half_brightness() {
        let glow = GlowAnimation::default();
        match glow.sample(ms(1500)) {
            AnimationStep::Running(pulse) => assert_eq!(pulse.emissive, Some(1.5)),
            AnimationStep::Finished => panic!("glow finished early"),
        }
    }

    #[test]
    fn test_strategy_from_config() {
        let mut config = AnimationConfig::default();
        config.style = ActivationStyle::Blink;
        config.blink_duration_secs = 2.5;
        let strategy = ActivationStrategy::from_config(&config);
        assert_eq!(strategy.style(), ActivationStyle::Blink);
        assert_eq!(strategy.duration(), ms(2500));

        config.style = ActivationStyle::Glow;
        let strategy = ActivationStrategy::from_config(&config);
        assert_eq!(strategy.duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_negative_duration_config_is_zero() {
        let config = AnimationConfig {
            style: ActivationStyle::Glow,
            glow_duration_secs: -1.0,
            ..AnimationConfig::default()
        };
        let strategy = ActivationStrategy::from_config(&config);
        assert_eq!(strategy.duration(), Duration::ZERO);
        assert_eq!(strategy.sample(Duration::ZERO), AnimationStep::Finished);
    }

    #[test]
    fn test_glow_restores_exact_rest_state() {
        let rest_color = Vec3::new(1.0, 0.8, 0.43);
        let mut appearance = Appearance::new(rest_color, 0.7, 1.0);
        let active = ActiveAnimation::new(
            ActivationStrategy::Glow(GlowAnimation::default()),
            Duration::from_secs(10),
            RestState::capture(&appearance),
        );

        assert!(active.apply(&mut appearance, Duration::from_millis(11_500)));
        assert!((appearance.color - rest_color * 3.0).length() < 1e-5);
        assert!((appearance.emissive - rest_color * 1.5).length() < 1e-5);

        assert!(!active.apply(&mut appearance, Duration::from_secs(13)));
        assert_eq!(appearance.color, rest_color);
        assert_eq!(appearance.emissive, Vec3::ZERO);
        assert_eq!(appearance.opacity, 1.0);
    }

    #[test]
    fn test_blink_forces_full_opacity_when_done() {
        let mut appearance = Appearance::new(Vec3::ONE, 1.0, 1.0);
        let active = ActiveAnimation::new(
            ActivationStrategy::Blink(BlinkAnimation::default()),
            Duration::ZERO,
            RestState::capture(&appearance),
        );
        assert!(active.apply(&mut appearance, Duration::ZERO));
        assert!((appearance.opacity - 0.3).abs() < 1e-6);
        assert!(!active.apply(&mut appearance, ms(5500)));
        assert_eq!(appearance.opacity, 1.0);
    }

    #[test]
    fn test_clock_before_start_counts_as_zero_elapsed() {
        let mut appearance = Appearance::new(Vec3::ONE, 1.0, 1.0);
        let active = ActiveAnimation::new(
            ActivationStrategy::Blink(BlinkAnimation::default()),
            Duration::from_secs(5),
            RestState::capture(&appearance),
        );
        assert!(active.apply(&mut appearance, Duration::from_secs(1)));
        assert!((appearance.opacity - 0.3).abs() < 1e-6);
    }
}
