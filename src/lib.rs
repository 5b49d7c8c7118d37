pub mod color;
pub mod command_line_options;
pub mod initial_conditions;
pub mod output;
pub mod parameters;
pub mod particle;
pub mod quadtree;
pub mod region;
pub mod simulation;
pub mod simulation_box;
pub mod simulation_builder;
pub mod visualization;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub type Float = f64;
    pub type MVec = glam::DVec2;

    pub use super::color::RColor;
    pub use super::command_line_options::CommandLineOptions;
    pub use super::particle::Particle;
    pub use super::particle::ParticleId;
    pub use super::particle::Particles;
    pub use super::quadtree::QuadTree;
    pub use super::quadtree::QuadTreeConfig;
    pub use super::quadtree::TreeStatistics;
    pub use super::region::Region;
    pub use super::simulation::ParticleTree;
    pub use super::simulation::Simulation;
    pub use super::simulation_box::Boundary;
    pub use super::simulation_box::SimulationBox;
    pub use super::simulation_builder::SimulationBuilder;
}
