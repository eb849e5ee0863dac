//! Star placement: random-branch single positions and fixed-quota bulk fields.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use starweave_config::GalaxyConfig;

use crate::sampler::GaussianSampler;
use crate::spiral::SpiralProjector;

/// Galactic region a position was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Tight Gaussian cluster at the origin.
    Core,
    /// Wider Gaussian cluster at the origin.
    OuterCore,
    /// Spiral arm with the given index.
    Arm(u32),
}

/// A generated position and the region it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub region: Region,
    pub position: Vec3,
}

/// Per-region object counts for a bulk field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionQuota {
    pub core: usize,
    pub outer_core: usize,
    /// One entry per arm.
    pub arms: Vec<usize>,
}

impl RegionQuota {
    /// Total object count across all regions.
    pub fn total(&self) -> usize {
        self.core + self.outer_core + self.arms.iter().sum::<usize>()
    }
}

/// Places objects in the galaxy.
#[derive(Clone, Debug)]
pub struct PositionGenerator {
    shape: GalaxyConfig,
    arms: u32,
    sampler: GaussianSampler,
    projector: SpiralProjector,
}

impl PositionGenerator {
    /// Create a generator for the given galaxy shape. At least one arm is used.
    pub fn new(shape: &GalaxyConfig) -> Self {
        Self {
            shape: shape.clone(),
            arms: shape.arms.max(1),
            sampler: GaussianSampler::new(shape.tail_sigma),
            projector: SpiralProjector::new(shape.arm_x_dist, shape.spiral),
        }
    }

    /// Number of spiral arms.
    pub fn arms(&self) -> u32 {
        self.arms
    }

    /// Angular offset of an arm: `arm · 2π / arms`.
    pub fn arm_offset(&self, arm: u32) -> f32 {
        arm as f32 * TAU / self.arms as f32
    }

    /// Draw one position inside `region`.
    pub fn sample_region<R: Rng + ?Sized>(&self, region: Region, rng: &mut R) -> Vec3 {
        let s = &self.shape;
        match region {
            Region::Core => Vec3::new(
                self.sampler.sample(rng, 0.0, s.core_x_dist),
                self.sampler.sample(rng, 0.0, s.core_y_dist),
                self.sampler.sample(rng, 0.0, s.thickness),
            ),
            Region::OuterCore => Vec3::new(
                self.sampler.sample(rng, 0.0, s.outer_core_x_dist),
                self.sampler.sample(rng, 0.0, s.outer_core_y_dist),
                self.sampler.sample(rng, 0.0, s.thickness),
            ),
            Region::Arm(arm) => {
                let x = self.sampler.sample(rng, s.arm_x_mean, s.arm_x_dist);
                let y = self.sampler.sample(rng, s.arm_y_mean, s.arm_y_dist);
                let z = self.sampler.sample(rng, 0.0, s.thickness);
                self.projector.project(x, y, z, self.arm_offset(arm % self.arms))
            }
        }
    }

    /// Pick a region by weighted chance (25% core, 25% outer core, 50% arms)
    /// and draw a position in it. Used for single user-star placement.
    pub fn random_placement<R: Rng + ?Sized>(&self, rng: &mut R) -> Placement {
        let roll: f32 = rng.random();
        let region = if roll < 0.25 {
            Region::Core
        } else if roll < 0.5 {
            Region::OuterCore
        } else {
            Region::Arm(rng.random_range(0..self.arms))
        };
        Placement {
            region,
            position: self.sample_region(region, rng),
        }
    }

    /// Position-only form of [`random_placement`](Self::random_placement).
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.random_placement(rng).position
    }

    /// Fixed allocation for a bulk field of `count` objects.
    ///
    /// A quarter goes to the core, a quarter to the outer core and the rest is
    /// split evenly across arms; leftovers go to the lowest arm indices.
    pub fn quota(&self, count: usize) -> RegionQuota {
        let core = count / 4;
        let outer_core = count / 4;
        let arm_total = count - core - outer_core;
        let arms = self.arms as usize;
        let per_arm = arm_total / arms;
        let leftover = arm_total % arms;
        RegionQuota {
            core,
            outer_core,
            arms: (0..arms)
                .map(|i| per_arm + usize::from(i < leftover))
                .collect(),
        }
    }

    /// Generate a bulk field following [`quota`](Self::quota), in region order.
    pub fn quota_placements<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Placement> {
        let quota = self.quota(count);
        let mut placements = Vec::with_capacity(count);

        let regions = std::iter::repeat_n(Region::Core, quota.core)
            .chain(std::iter::repeat_n(Region::OuterCore, quota.outer_core))
            .chain(
                quota
                    .arms
                    .iter()
                    .enumerate()
                    .flat_map(|(arm, &n)| std::iter::repeat_n(Region::Arm(arm as u32), n)),
            );

        for region in regions {
            placements.push(Placement {
                region,
                position: self.sample_region(region, rng),
            });
        }

        placements
    }
}
