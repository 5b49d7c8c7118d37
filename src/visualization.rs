//! Drawing primitives handed to whatever renders the simulation.
//! Nothing in here draws; it only describes what should be drawn.
use serde::Serialize;

use crate::color::RColor;
use crate::particle::Particle;
use crate::prelude::Float;
use crate::prelude::MVec;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCircle {
    pub position: MVec,
    pub radius: Float,
    pub color: RColor,
}

/// The outline of an axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRect {
    pub min: MVec,
    pub max: MVec,
    pub color: RColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawText {
    pub position: MVec,
    pub text: String,
    pub color: RColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawItem {
    Circle(DrawCircle),
    Rect(DrawRect),
    Text(DrawText),
}

impl From<&Particle> for DrawCircle {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.pos,
            radius: particle.radius,
            color: particle.color,
        }
    }
}

pub fn draw_particles<'a>(particles: impl IntoIterator<Item = &'a Particle>) -> Vec<DrawItem> {
    particles
        .into_iter()
        .map(|particle| DrawItem::Circle(particle.into()))
        .collect()
}
