//! CLI entry point for the photo-mosaic generator

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let mut processor = MosaicProcessor::new(cli);
    let output = processor.process()?;

    // Allow print for the final user-facing summary
    #[allow(clippy::print_stdout)]
    if !quiet {
        println!("Output written to: {}", output.output_path.display());
    }

    Ok(())
}
