use derive_more::Deref;
use derive_more::DerefMut;
use derive_more::Display;
use derive_more::From;
use derive_more::Into;
use serde::Serialize;

use crate::color::RColor;
use crate::prelude::Float;
use crate::prelude::MVec;
use crate::quadtree::LeafDataType;

#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize,
)]
pub struct ParticleId(pub usize);

/// A moving circle. The id and the velocity are fixed at creation,
/// only the position changes over time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    id: ParticleId,
    pub pos: MVec,
    vel: MVec,
    pub radius: Float,
    pub color: RColor,
}

impl Particle {
    pub fn new(id: ParticleId, pos: MVec, vel: MVec, radius: Float) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color: RColor::default(),
        }
    }

    pub fn with_color(self, color: RColor) -> Self {
        Self { color, ..self }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn vel(&self) -> MVec {
        self.vel
    }
}

impl LeafDataType for Particle {
    fn pos(&self) -> &MVec {
        &self.pos
    }
}

/// All particles of the simulation, in creation order. Particles are
/// never added or removed after initialization.
#[derive(Clone, Debug, Default, Deref, DerefMut, From)]
pub struct Particles(Vec<Particle>);

impl Particles {
    /// Drift every particle along its velocity. Positions are not
    /// clamped to any region.
    pub fn integrate(&mut self, dt: Float) {
        for particle in self.0.iter_mut() {
            particle.pos += particle.vel * dt;
        }
    }
}
