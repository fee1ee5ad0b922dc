//! CLI entry point for the maze generator

use clap::Parser;
use mazecarve::io::cli::{Cli, MazeRunner, init_tracing};

fn main() -> mazecarve::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut runner = MazeRunner::new(cli);
    runner.run()?;
    Ok(())
}
