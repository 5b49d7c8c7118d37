mod parameter_file_contents;

use std::str::FromStr;

use derive_more::Display;
pub use parameter_file_contents::ParameterFileContents;
use serde_yaml::Value;

pub use crate::initial_conditions::InitialConditionsParameters;
pub use crate::output::OutputParameters;
pub use crate::quadtree::QuadTreeConfig;
pub use crate::simulation::SimulationParameters;
pub use crate::simulation_box::SimulationBoxParameters;

#[derive(Debug, Display)]
pub enum ParameterError {
    #[display(fmt = "Failed to read parameter file {}: {}", _0, _1)]
    ReadFile(String, std::io::Error),
    #[display(fmt = "Failed to parse parameter file: {}", _0)]
    Yaml(serde_yaml::Error),
    #[display(fmt = "Parameter file is not a mapping of section names to sections")]
    NotAMapping,
    #[display(fmt = "Invalid section name: {}", _0)]
    InvalidSectionName(String),
    #[display(fmt = "Failed to read parameter file section \"{}\": {}", section, message)]
    InvalidSection { section: String, message: String },
    #[display(fmt = "Invalid override \"{}\". Expected section.key=value", _0)]
    InvalidOverride(String),
    #[display(fmt = "Invalid parameter value: {}", _0)]
    InvalidValue(String),
}

impl std::error::Error for ParameterError {}

impl From<serde_yaml::Error> for ParameterError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

/// Replaces a single value in one section of the parameter file,
/// written as `section.key1.key2=value` on the command line.
/// Without keys (`section=value`), the entire section is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub section: String,
    pub keys: Vec<String>,
    pub value: Value,
}

impl FromStr for Override {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParameterError::InvalidOverride(s.to_owned());
        let (path, value) = s.split_once('=').ok_or_else(invalid)?;
        let mut keys = path.trim().split('.').map(|key| key.trim().to_owned());
        let section = keys.next().filter(|section| !section.is_empty()).ok_or_else(invalid)?;
        let keys: Vec<_> = keys.collect();
        if keys.iter().any(|key| key.is_empty()) {
            return Err(invalid());
        }
        let value = serde_yaml::from_str(value).map_err(|_| invalid())?;
        Ok(Self {
            section,
            keys,
            value,
        })
    }
}

/// All parameter sections used by a simulation run.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub initial_conditions: InitialConditionsParameters,
    pub quadtree: QuadTreeConfig,
    pub simulation: SimulationParameters,
    pub simulation_box: SimulationBoxParameters,
    pub output: OutputParameters,
}

impl Parameters {
    pub fn from_contents(contents: &mut ParameterFileContents) -> Result<Self, ParameterError> {
        let parameters = Self {
            initial_conditions: contents.extract_parameter_struct()?,
            quadtree: contents.extract_parameter_struct()?,
            simulation: contents.extract_parameter_struct()?,
            simulation_box: contents.extract_parameter_struct()?,
            output: contents.extract_parameter_struct()?,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        self.initial_conditions.validate()?;
        self.quadtree.validate()?;
        self.simulation.validate()?;
        self.simulation_box.validate()?;
        self.output.validate()
    }
}
