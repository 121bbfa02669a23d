use std::path::PathBuf;

use clap::Parser;

/// A terminal pet whose mood follows the health of the machine it runs on.
#[derive(Parser, Debug)]
#[command(name = "pixpet", version)]
pub struct Cli {
    /// Log every metric snapshot and show the log panel
    #[arg(short, long)]
    pub verbose: bool,

    /// Cycle through canned scenarios instead of reading the host (implies --verbose)
    #[arg(short, long)]
    pub test: bool,

    /// Draw the 8×8 classic cat on a mood-coloured background
    #[arg(long)]
    pub classic: bool,

    /// Configuration file to load instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose || self.test
    }
}
