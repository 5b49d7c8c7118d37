use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use derive_custom::quadsim_parameters;
use derive_more::Display;
use log::debug;
use log::info;
use serde::Serialize;

use crate::color::RColor;
use crate::parameters::ParameterError;
use crate::prelude::Float;
use crate::quadtree::visualization::draw_quadtree;
use crate::quadtree::TreeStatistics;
use crate::simulation::ParticleTree;
use crate::simulation::Simulation;
use crate::visualization::draw_particles;
use crate::visualization::DrawItem;

pub const FRAMES_FILE_NAME: &str = "frames.yml";
pub const PARAMETERS_FILE_NAME: &str = "parameters.yml";
pub const BUILD_INFO_FILE_NAME: &str = "build_info.yml";

const TREE_COLOR: RColor = RColor::BLUE;

#[quadsim_parameters("output")]
#[derive(Debug, PartialEq)]
#[serde(default)]
pub struct OutputParameters {
    /// Directory to write frames to. Nothing is written if omitted.
    pub output_dir: Option<PathBuf>,
    pub every_n_frames: usize,
}

impl Default for OutputParameters {
    fn default() -> Self {
        Self {
            output_dir: None,
            every_n_frames: 1,
        }
    }
}

impl OutputParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.every_n_frames == 0 {
            return Err(ParameterError::InvalidValue(
                "every_n_frames must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Display)]
pub enum OutputError {
    #[display(fmt = "Failed to write output: {}", _0)]
    Io(io::Error),
    #[display(fmt = "Failed to serialize output: {}", _0)]
    Yaml(serde_yaml::Error),
}

impl std::error::Error for OutputError {}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for OutputError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub timestamp: &'static str,
    pub opt_level: &'static str,
    pub target_triple: &'static str,
}

impl BuildInfo {
    pub fn get() -> Self {
        Self {
            timestamp: env!("VERGEN_BUILD_TIMESTAMP"),
            opt_level: env!("VERGEN_CARGO_OPT_LEVEL"),
            target_triple: env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }
    }
}

/// A single frame as written to the frames file.
#[derive(Debug, Serialize)]
pub struct Frame {
    pub index: usize,
    pub time: Float,
    pub statistics: TreeStatistics,
    pub items: Vec<DrawItem>,
}

impl Frame {
    pub fn new(simulation: &Simulation, tree: Option<&ParticleTree<'_>>) -> Self {
        let mut items = draw_particles(simulation.particles().iter());
        items.extend(draw_quadtree(tree, TREE_COLOR));
        Self {
            index: simulation.frame(),
            time: simulation.time(),
            statistics: TreeStatistics::of(tree),
            items,
        }
    }
}

fn write_yaml(path: &Path, value: &impl Serialize) -> Result<(), OutputError> {
    let file = File::create(path)?;
    serde_yaml::to_writer(file, value)?;
    Ok(())
}

/// Writes frames to `frames.yml`, one YAML document per frame.
pub struct Output {
    output_dir: PathBuf,
    every_n_frames: usize,
    frames: BufWriter<File>,
    num_frames_written: usize,
}

impl Output {
    /// Creates the output directory and writes the parameters and the
    /// build information into it. Returns `None` if no output directory
    /// is configured.
    pub fn new(
        parameters: &OutputParameters,
        used_parameters: &str,
    ) -> Result<Option<Self>, OutputError> {
        let output_dir = match parameters.output_dir {
            Some(ref output_dir) => output_dir.clone(),
            None => return Ok(None),
        };
        fs::create_dir_all(&output_dir)?;
        fs::write(output_dir.join(PARAMETERS_FILE_NAME), used_parameters)?;
        write_yaml(&output_dir.join(BUILD_INFO_FILE_NAME), &BuildInfo::get())?;
        let frames = BufWriter::new(File::create(output_dir.join(FRAMES_FILE_NAME))?);
        info!("Writing output to {}", output_dir.display());
        Ok(Some(Self {
            output_dir,
            every_n_frames: parameters.every_n_frames,
            frames,
            num_frames_written: 0,
        }))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn num_frames_written(&self) -> usize {
        self.num_frames_written
    }

    pub fn should_write(&self, frame: usize) -> bool {
        frame % self.every_n_frames == 0
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), OutputError> {
        writeln!(self.frames, "---")?;
        serde_yaml::to_writer(&mut self.frames, frame)?;
        self.num_frames_written += 1;
        debug!("Wrote frame {}", frame.index);
        Ok(())
    }

    /// Writes the current state if it falls on an output frame.
    pub fn on_frame(
        &mut self,
        simulation: &Simulation,
        tree: Option<&ParticleTree<'_>>,
    ) -> Result<(), OutputError> {
        if self.should_write(simulation.frame()) {
            self.write_frame(&Frame::new(simulation, tree))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), OutputError> {
        self.frames.flush()?;
        Ok(())
    }
}
