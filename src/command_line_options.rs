use std::path::PathBuf;

use clap::Parser;

use crate::parameters::Override;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CommandLineOptions {
    /// YAML parameter file. All sections are optional.
    pub parameter_file_path: Option<PathBuf>,
    #[clap(short, parse(from_occurrences))]
    pub verbosity: usize,
    /// Override a parameter, e.g. `--set quadtree.max_depth=6`.
    #[clap(long = "set", parse(try_from_str))]
    pub overrides: Vec<Override>,
    #[clap(long)]
    pub num_frames: Option<usize>,
}
