use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use pixpet_core::logging;
use pixpet_grid::{load, BitGrid, OutputFormat, DEFAULT_SIZE, DEFAULT_THRESHOLD};

/// Print an image as a 0/1 grid initializer followed by ASCII art.
#[derive(Parser, Debug)]
#[command(name = "img2grid", version)]
struct Cli {
    /// PNG or JPEG file to convert
    image: PathBuf,

    /// Grid width and height in cells
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..=256))]
    size: u32,

    /// Mean RGB intensity at or above which a cell becomes 1
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Initializer syntax
    #[arg(long, value_enum, default_value_t = OutputFormat::Rust)]
    format: OutputFormat,

    /// Draw `#` for light (1) cells and space for dark ones, matching the
    /// original C converter; by default `#` marks dark (0) cells
    #[arg(long)]
    invert: bool,
}

fn convert(cli: &Cli) -> Result<String> {
    let img = load(&cli.image)?;
    BitGrid::from_image(&img, cli.size, cli.threshold).report(cli.format, cli.invert)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init_stderr();

    match convert(&cli) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
