use std::path::PathBuf;

use clap::Parser;

use sweep_common::config::SweepConfig;

#[derive(Debug, Parser)]
#[command(
    name = "pdfsweep",
    about = "Extract the text of every PDF in a directory into one text file"
)]
pub struct Args {
    /// Path to config file (default: ./pdfsweep.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to scan for PDFs (overrides `input_dir`)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output text file (overrides `output_file`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Process files in name order
    #[arg(long)]
    pub sort: bool,

    /// Also match `.PDF`, `.Pdf`, ...
    #[arg(long)]
    pub ignore_case: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Layer command-line values over a loaded config. Flags only ever turn
    /// options on; a config file's `true` is not undone by omitting the flag.
    pub fn apply(&self, config: &mut SweepConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(out) = &self.output {
            config.output_file = out.clone();
        }
        config.scan.sort |= self.sort;
        config.scan.ignore_case |= self.ignore_case;
    }
}
