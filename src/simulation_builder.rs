use std::fs;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::info;
use log::LevelFilter;

use crate::command_line_options::CommandLineOptions;
use crate::parameters::Override;
use crate::parameters::ParameterError;
use crate::parameters::ParameterFileContents;
use crate::parameters::Parameters;
use crate::simulation::Simulation;
use crate::simulation_box::SimulationBox;

/// Everything needed to run a simulation: the simulation itself, the
/// parameters it was built from and the rendered parameter file
/// (including defaults and overrides).
#[derive(Debug)]
pub struct SimulationSetup {
    pub simulation: Simulation,
    pub parameters: Parameters,
    pub used_parameters: String,
}

#[derive(Debug, Default)]
pub struct SimulationBuilder {
    pub parameter_file_path: Option<PathBuf>,
    pub parameter_file_contents: Option<String>,
    pub overrides: Vec<Override>,
    pub num_frames: Option<usize>,
    pub verbosity: usize,
}

impl SimulationBuilder {
    pub fn with_command_line_options(&mut self, opts: &CommandLineOptions) -> &mut Self {
        if let Some(ref path) = opts.parameter_file_path {
            self.parameter_file_path(path);
        }
        self.overrides.extend(opts.overrides.iter().cloned());
        if opts.num_frames.is_some() {
            self.num_frames = opts.num_frames;
        }
        self.verbosity(opts.verbosity);
        self
    }

    pub fn parameter_file_path(&mut self, path: &Path) -> &mut Self {
        self.parameter_file_path = Some(path.to_owned());
        self
    }

    /// Use the given parameter file contents instead of reading a file.
    pub fn parameter_file_contents(&mut self, contents: &str) -> &mut Self {
        self.parameter_file_contents = Some(contents.to_owned());
        self
    }

    pub fn add_override(&mut self, o: Override) -> &mut Self {
        self.overrides.push(o);
        self
    }

    pub fn num_frames(&mut self, num_frames: usize) -> &mut Self {
        self.num_frames = Some(num_frames);
        self
    }

    pub fn verbosity(&mut self, verbosity: usize) -> &mut Self {
        self.verbosity = verbosity;
        self
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn read_parameter_file_contents(&self) -> Result<ParameterFileContents, ParameterError> {
        let contents = match (&self.parameter_file_contents, &self.parameter_file_path) {
            (Some(contents), _) => contents.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .map_err(|e| ParameterError::ReadFile(path.display().to_string(), e))?,
            (None, None) => {
                info!("No parameter file given, using default parameters");
                String::new()
            }
        };
        let mut contents = ParameterFileContents::new(&contents)?;
        let mut overrides = self.overrides.clone();
        if let Some(num_frames) = self.num_frames {
            overrides.push(Override {
                section: "simulation".into(),
                keys: vec!["num_frames".into()],
                value: (num_frames as u64).into(),
            });
        }
        contents.with_overrides(overrides);
        Ok(contents)
    }

    pub fn read_parameters(&self) -> Result<(Parameters, String), ParameterError> {
        let mut contents = self.read_parameter_file_contents()?;
        let parameters = Parameters::from_contents(&mut contents)?;
        let used_parameters = contents.contents()?;
        debug!("Parameters:\n{}", used_parameters);
        Ok((parameters, used_parameters))
    }

    pub fn build(&self) -> Result<SimulationSetup, ParameterError> {
        let (parameters, used_parameters) = self.read_parameters()?;
        Ok(SimulationSetup {
            simulation: Simulation::from_parameters(&parameters),
            parameters,
            used_parameters,
        })
    }
}

impl Simulation {
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let simulation_box: SimulationBox = (&parameters.simulation_box).into();
        let initial_conditions = &parameters.initial_conditions;
        let particles =
            initial_conditions.generate(simulation_box.region(), &mut initial_conditions.rng());
        Self::new(
            particles,
            simulation_box,
            parameters.quadtree.clone(),
            parameters.simulation.frame_period,
        )
    }
}
