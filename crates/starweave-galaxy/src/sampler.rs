//! Gaussian scalar sampling used for every placement in the galaxy.

use rand::Rng;
use rand_distr::StandardNormal;

/// Standard-normal draws beyond this many sigmas are rejected by default.
pub const DEFAULT_TAIL_SIGMA: f32 = 6.0;

/// Rejected draws before the sampler gives up and clips.
const MAX_RESAMPLES: u32 = 16;

/// Normal-distribution sampler with a bounded tail.
///
/// Draws outside `±tail_sigma` (or non-finite draws) are resampled, so a
/// sample is always within `mean ± tail_sigma * std_dev`. The sampler holds no
/// state of its own; the uniform source is the caller's RNG.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianSampler {
    tail_sigma: f32,
}

impl GaussianSampler {
    /// Create a sampler rejecting standard-normal draws beyond `tail_sigma`.
    ///
    /// Non-positive or non-finite bounds fall back to [`DEFAULT_TAIL_SIGMA`].
    pub fn new(tail_sigma: f32) -> Self {
        let tail_sigma = if tail_sigma.is_finite() && tail_sigma > 0.0 {
            tail_sigma
        } else {
            DEFAULT_TAIL_SIGMA
        };
        Self { tail_sigma }
    }

    /// The rejection bound in standard deviations.
    pub fn tail_sigma(&self) -> f32 {
        self.tail_sigma
    }

    /// Draw a standard-normal value inside `[-tail_sigma, tail_sigma]`.
    pub fn standard<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let mut last = 0.0;
        for _ in 0..MAX_RESAMPLES {
            let z: f32 = rng.sample(StandardNormal);
            if !z.is_finite() {
                continue;
            }
            if z.abs() <= self.tail_sigma {
                return z;
            }
            last = z;
        }
        last.clamp(-self.tail_sigma, self.tail_sigma)
    }

    /// Draw from `N(mean, std_dev²)`.
    ///
    /// A non-finite `std_dev` collapses the distribution onto `mean`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, mean: f32, std_dev: f32) -> f32 {
        if !std_dev.is_finite() {
            return mean;
        }
        mean + self.standard(rng) * std_dev.abs()
    }
}

impl Default for GaussianSampler {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_SIGMA)
    }
}

/// Draw from `N(mean, std_dev²)` with the default tail bound.
pub fn gaussian_random<R: Rng + ?Sized>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    GaussianSampler::default().sample(rng, mean, std_dev)
}
