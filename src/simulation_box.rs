use derive_custom::quadsim_parameters;
use derive_more::Deref;

use crate::parameters::ParameterError;
use crate::particle::Particles;
use crate::prelude::Float;
use crate::prelude::MVec;
use crate::region::Region;

/// What happens to particles that leave the simulation box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Particles keep moving outside of the box. They are still
    /// integrated but no longer appear in the tree.
    #[default]
    Open,
    /// Positions are wrapped back into the box.
    Periodic,
}

/// The root region of the tree. Its size is typically the size of the
/// surface the simulation is drawn on.
#[quadsim_parameters("simulation_box")]
#[derive(Debug, PartialEq)]
#[serde(default)]
pub struct SimulationBoxParameters {
    pub width: Float,
    pub height: Float,
    pub boundary: Boundary,
}

impl Default for SimulationBoxParameters {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            boundary: Boundary::Open,
        }
    }
}

impl SimulationBoxParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        let is_valid = |length: Float| length >= 0.0 && length.is_finite();
        if !(is_valid(self.width) && is_valid(self.height)) {
            return Err(ParameterError::InvalidValue(format!(
                "simulation box dimensions must be finite and non-negative, got {} x {}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deref)]
pub struct SimulationBox {
    #[deref]
    region: Region,
    boundary: Boundary,
}

fn periodic_wrap_component(v: Float, min: Float, length: Float) -> Float {
    if length > 0.0 {
        min + (v - min).rem_euclid(length)
    } else {
        v
    }
}

impl SimulationBox {
    pub fn new(region: Region, boundary: Boundary) -> Self {
        Self { region, boundary }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn periodic_wrap(&self, pos: MVec) -> MVec {
        MVec::new(
            periodic_wrap_component(pos.x, self.region.x, self.region.width),
            periodic_wrap_component(pos.y, self.region.y, self.region.height),
        )
    }

    /// Applies the boundary condition to all particles.
    pub fn apply(&self, particles: &mut Particles) {
        match self.boundary {
            Boundary::Open => {}
            Boundary::Periodic => {
                for particle in particles.iter_mut() {
                    particle.pos = self.periodic_wrap(particle.pos);
                }
            }
        }
    }
}

impl From<&SimulationBoxParameters> for SimulationBox {
    fn from(parameters: &SimulationBoxParameters) -> Self {
        Self::new(
            Region::from_size(parameters.width, parameters.height),
            parameters.boundary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Boundary;
    use super::SimulationBox;
    use super::SimulationBoxParameters;
    use crate::particle::Particle;
    use crate::particle::ParticleId;
    use crate::particle::Particles;
    use crate::prelude::Float;
    use crate::prelude::MVec;
    use crate::region::Region;
    use crate::test_utils::assert_vec_is_close;

    fn periodic_box() -> SimulationBox {
        SimulationBox::new(Region::new(-1.0, 0.0, 2.0, 4.0), Boundary::Periodic)
    }

    #[test]
    fn periodic_wrap() {
        let box_ = periodic_box();
        assert_vec_is_close(box_.periodic_wrap(MVec::new(0.5, 1.0)), MVec::new(0.5, 1.0));
        assert_vec_is_close(box_.periodic_wrap(MVec::new(1.5, 1.0)), MVec::new(-0.5, 1.0));
        assert_vec_is_close(box_.periodic_wrap(MVec::new(-1.5, -1.0)), MVec::new(0.5, 3.0));
        assert_vec_is_close(box_.periodic_wrap(MVec::new(5.5, 9.0)), MVec::new(-0.5, 1.0));
    }

    #[test]
    fn periodic_wrap_in_degenerate_box_leaves_positions_unchanged() {
        let box_ = SimulationBox::new(Region::new(0.0, 0.0, 0.0, 0.0), Boundary::Periodic);
        assert_vec_is_close(box_.periodic_wrap(MVec::new(3.0, 4.0)), MVec::new(3.0, 4.0));
    }

    #[test]
    fn apply_boundary() {
        let particles: Particles = vec![Particle::new(
            ParticleId(0),
            MVec::new(2.0, 5.0),
            MVec::new(1.0, 1.0),
            1.0,
        )]
        .into();
        let mut wrapped = particles.clone();
        periodic_box().apply(&mut wrapped);
        assert_vec_is_close(wrapped[0].pos, MVec::new(0.0, 1.0));
        assert_eq!(wrapped[0].vel(), MVec::new(1.0, 1.0));
        assert!(periodic_box().contains(&wrapped[0].pos));

        let open = SimulationBox::new(*periodic_box().region(), Boundary::Open);
        let mut unchanged = particles.clone();
        open.apply(&mut unchanged);
        assert_eq!(*unchanged, *particles);
        assert!(!open.contains(&unchanged[0].pos));
    }

    #[test]
    fn box_from_parameters() {
        let box_: SimulationBox = (&SimulationBoxParameters::default()).into();
        assert_eq!(*box_.region(), Region::from_size(1000.0, 1000.0));
        assert_eq!(box_.boundary(), Boundary::Open);
        assert_eq!(box_.width, 1000.0);
    }

    #[test]
    fn box_dimensions_must_be_finite_and_non_negative() {
        let parameters = |width, height| SimulationBoxParameters {
            width,
            height,
            ..Default::default()
        };
        assert!(parameters(0.0, 10.0).validate().is_ok());
        assert!(parameters(Float::INFINITY, 10.0).validate().is_err());
        assert!(parameters(10.0, Float::NAN).validate().is_err());
        assert!(parameters(-1.0, 10.0).validate().is_err());
    }
}
