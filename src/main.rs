use std::error::Error;

use clap::Parser;
use log::debug;
use log::info;
use quadsim::output::BuildInfo;
use quadsim::output::Output;
use quadsim::prelude::*;
use quadsim::simulation_builder::SimulationSetup;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;

fn main() -> Result<(), Box<dyn Error>> {
    let opts = CommandLineOptions::parse();
    let mut builder = SimulationBuilder::default();
    builder.with_command_line_options(&opts);
    TermLogger::init(
        builder.log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    let build_info = BuildInfo::get();
    info!(
        "quadsim {} (built {}, opt-level {}, {})",
        env!("CARGO_PKG_VERSION"),
        build_info.timestamp,
        build_info.opt_level,
        build_info.target_triple
    );
    let SimulationSetup {
        mut simulation,
        parameters,
        used_parameters,
    } = builder.build()?;
    let num_frames = parameters.simulation.num_frames;
    info!(
        "Simulating {} particles in {:?} ({:?} boundary) for {} frames",
        simulation.particles().len(),
        simulation.simulation_box().region(),
        simulation.simulation_box().boundary(),
        num_frames
    );
    let mut output = Output::new(&parameters.output, &used_parameters)?;
    let mut result = Ok(());
    let mut last_statistics = TreeStatistics::default();
    simulation.run(num_frames, |simulation, tree| {
        let statistics = TreeStatistics::of(tree);
        debug!("Frame {}: {:?}", simulation.frame(), statistics);
        if let Some(output) = output.as_mut() {
            if result.is_ok() {
                result = output.on_frame(simulation, tree);
            }
        }
        last_statistics = statistics;
    });
    result?;
    if let Some(output) = output {
        info!(
            "Wrote {} frames to {}",
            output.num_frames_written(),
            output.output_dir().display()
        );
        output.finish()?;
    }
    let num_particles = simulation.particles().len();
    let num_outside = simulation.num_particles_outside(simulation.simulation_box().region());
    info!(
        "Finished {} frames at t = {:.3}s. {} of {} particles inside the simulation box, final tree: {} nodes, {} leaves, depth {}",
        simulation.frame(),
        simulation.time(),
        num_particles - num_outside,
        num_particles,
        last_statistics.num_nodes,
        last_statistics.num_leaves,
        last_statistics.max_depth,
    );
    Ok(())
}
