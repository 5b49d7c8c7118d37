use derive_custom::quadsim_parameters;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::color::RColor;
use crate::parameters::ParameterError;
use crate::particle::Particle;
use crate::particle::ParticleId;
use crate::particle::Particles;
use crate::prelude::Float;
use crate::prelude::MVec;
use crate::region::Region;

/// A closed range of floating point values.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatRange {
    pub min: Float,
    pub max: Float,
}

/// Where the particles are placed initially.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Particle i is placed at (i * spacing, i * spacing).
    Diagonal { spacing: Float },
    /// Uniformly distributed inside the simulation box.
    Random,
    /// Explicit positions, one per particle. Overrides num_particles.
    Positions(Vec<MVec>),
}

/// Parameters controlling how the particle set is created.
#[quadsim_parameters("initial_conditions")]
#[derive(Debug, PartialEq)]
#[serde(default)]
pub struct InitialConditionsParameters {
    pub num_particles: usize,
    pub placement: Placement,
    /// Range of the particle radii.
    pub radius: FloatRange,
    /// Each velocity component is drawn uniformly from
    /// [-max_velocity, max_velocity] (in units per second).
    pub max_velocity: Float,
    /// Seed for the random number generator. If absent, the
    /// generator is seeded from system entropy.
    pub seed: Option<u64>,
    pub color: RColor,
}

impl Default for InitialConditionsParameters {
    fn default() -> Self {
        Self {
            num_particles: 20,
            placement: Placement::Diagonal { spacing: 50.0 },
            radius: FloatRange {
                min: 10.0,
                max: 60.0,
            },
            max_velocity: 150.0,
            seed: None,
            color: RColor::BLACK,
        }
    }
}

impl InitialConditionsParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        let invalid = |msg: String| Err(ParameterError::InvalidValue(msg));
        if !(self.radius.min >= 0.0 && self.radius.min <= self.radius.max) {
            return invalid(format!(
                "radius range must satisfy 0 <= min <= max, got {:?}",
                self.radius
            ));
        }
        if !self.radius.max.is_finite() {
            return invalid(format!("radius must be finite, got {:?}", self.radius));
        }
        // Velocities are drawn from [-max_velocity, max_velocity], whose
        // width must be finite.
        if !(self.max_velocity >= 0.0 && (2.0 * self.max_velocity).is_finite()) {
            return invalid(format!(
                "max_velocity must be non-negative and at most {:e}, got {}",
                Float::MAX / 2.0,
                self.max_velocity
            ));
        }
        Ok(())
    }

    pub fn num_particles(&self) -> usize {
        match self.placement {
            Placement::Positions(ref positions) => positions.len(),
            _ => self.num_particles,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Creates the particles. `box_region` is only used for the
    /// random placement.
    pub fn generate<R: Rng>(&self, box_region: &Region, rng: &mut R) -> Particles {
        let particles: Vec<_> = (0..self.num_particles())
            .map(|i| {
                let pos = self.initial_position(i, box_region, rng);
                let radius = rng.gen_range(self.radius.min..=self.radius.max);
                let vel = MVec::new(
                    rng.gen_range(-self.max_velocity..=self.max_velocity),
                    rng.gen_range(-self.max_velocity..=self.max_velocity),
                );
                Particle::new(ParticleId(i), pos, vel, radius).with_color(self.color)
            })
            .collect();
        debug!("Generated {} particles", particles.len());
        particles.into()
    }

    fn initial_position<R: Rng>(&self, i: usize, box_region: &Region, rng: &mut R) -> MVec {
        match self.placement {
            Placement::Diagonal { spacing } => MVec::splat(i as Float * spacing),
            Placement::Random => gen_position(rng, box_region),
            Placement::Positions(ref positions) => positions[i],
        }
    }
}

/// Generates a position uniformly distributed inside the region.
/// Degenerate regions yield their origin along the degenerate axis.
pub fn gen_position<R: Rng>(rng: &mut R, region: &Region) -> MVec {
    let gen_component = |rng: &mut R, min: Float, length: Float| {
        if length > 0.0 {
            rng.gen_range(min..min + length)
        } else {
            min
        }
    };
    let x = gen_component(rng, region.x, region.width);
    let y = gen_component(rng, region.y, region.height);
    MVec::new(x, y)
}
