//! CLI entry point for relabeling segmentation label images

use clap::Parser;
use neuroview::io::cli::{Cli, FileProcessor};
use neuroview::io::logging::init_tracing;

fn main() -> neuroview::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let processor = FileProcessor::new(cli);
    processor.process().map(drop)
}
