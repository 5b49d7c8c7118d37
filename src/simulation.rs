use derive_custom::quadsim_parameters;
use log::debug;
use log::trace;

use crate::parameters::ParameterError;
use crate::particle::Particle;
use crate::particle::Particles;
use crate::prelude::Float;
use crate::quadtree;
use crate::quadtree::QuadTree;
use crate::quadtree::QuadTreeConfig;
use crate::region::Region;
use crate::simulation_box::SimulationBox;

/// The tree built every frame. It borrows the particles of the
/// simulation, so the particles cannot change while it is alive.
pub type ParticleTree<'a> = QuadTree<&'a Particle>;

#[quadsim_parameters("simulation")]
#[derive(Debug, PartialEq)]
#[serde(default)]
pub struct SimulationParameters {
    /// Length of a single frame in seconds.
    pub frame_period: Float,
    /// The number of frames to run before exiting.
    pub num_frames: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            frame_period: 1.0 / 60.0,
            num_frames: 600,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.frame_period > 0.0 && self.frame_period.is_finite()) {
            return Err(ParameterError::InvalidValue(format!(
                "frame_period must be positive and finite, got {}",
                self.frame_period
            )));
        }
        Ok(())
    }
}

/// All state that persists between frames. The tree itself is not
/// part of it: it is rebuilt from scratch every frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Particles,
    simulation_box: SimulationBox,
    quadtree_config: QuadTreeConfig,
    frame_period: Float,
    time: Float,
    frame: usize,
}

impl Simulation {
    pub fn new(
        particles: Particles,
        simulation_box: SimulationBox,
        quadtree_config: QuadTreeConfig,
        frame_period: Float,
    ) -> Self {
        Self {
            particles,
            simulation_box,
            quadtree_config,
            frame_period,
            time: 0.0,
            frame: 0,
        }
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn simulation_box(&self) -> &SimulationBox {
        &self.simulation_box
    }

    pub fn quadtree_config(&self) -> &QuadTreeConfig {
        &self.quadtree_config
    }

    pub fn frame_period(&self) -> Float {
        self.frame_period
    }

    pub fn time(&self) -> Float {
        self.time
    }

    /// The number of completed calls to `step`.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: Float) {
        self.particles.integrate(dt);
        self.simulation_box.apply(&mut self.particles);
        self.time += dt;
        self.frame += 1;
        trace!("Frame {} at t = {:.4}", self.frame, self.time);
    }

    /// Builds a fresh tree over the current particle positions.
    pub fn rebuild(&self, region: &Region) -> Option<ParticleTree<'_>> {
        QuadTree::new(&self.quadtree_config, self.particles.iter(), region)
    }

    /// Builds a fresh tree with the simulation box as root region.
    pub fn rebuild_in_box(&self) -> Option<ParticleTree<'_>> {
        self.rebuild(self.simulation_box.region())
    }

    /// Walks a tree in pre-order. Nothing is visited for an absent
    /// tree.
    pub fn traverse<'a, 'b>(
        tree: Option<&'a ParticleTree<'b>>,
        visit: impl FnMut(&'a Region, Option<&'a [&'b Particle]>),
    ) {
        quadtree::traverse(tree, visit)
    }

    pub fn num_particles_outside(&self, region: &Region) -> usize {
        self.particles
            .iter()
            .filter(|particle| !region.contains(&particle.pos))
            .count()
    }

    /// Runs `num_frames` frames. Each frame advances the simulation by
    /// one frame period, rebuilds the tree over the simulation box and
    /// hands it to `on_frame`. The tree is dropped before the next
    /// frame starts.
    pub fn run(
        &mut self,
        num_frames: usize,
        mut on_frame: impl FnMut(&Simulation, Option<&ParticleTree<'_>>),
    ) {
        for _ in 0..num_frames {
            self.step(self.frame_period);
            let tree = self.rebuild_in_box();
            debug!(
                "Frame {}: {} particles outside of the simulation box",
                self.frame,
                self.num_particles_outside(self.simulation_box.region())
            );
            on_frame(self, tree.as_ref());
        }
    }
}
