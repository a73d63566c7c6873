//! Command-line interface components.

use crate::config::{DispatchMode, ParserConfig, PreSort};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ebird-parser")]
#[command(about = "Parse an eBird observation export and summarize its contents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the eBird CSV export (MyEBirdData.csv)
    #[arg(value_name = "CSV_PATH")]
    pub csv_path: PathBuf,

    /// How rows are handed to the summarizer
    #[arg(short, long, value_enum, default_value_t = DispatchMode::Sequential)]
    pub mode: DispatchMode,

    /// Sort observations by date and time before processing
    #[arg(short, long, value_enum, default_value_t = PreSort::None)]
    pub sort: PreSort,

    /// Worker threads for concurrent mode (0 = number of CPUs)
    #[arg(short, long, default_value = "0")]
    pub workers: usize,

    /// Number of species listed in the summary
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parser configuration selected on the command line
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_dispatch_mode(self.mode)
            .with_pre_sort(self.sort)
            .with_workers(self.workers)
    }

    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
