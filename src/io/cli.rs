//! Command-line interface for generating, solving and printing mazes

use crate::algorithm::session::{MazeReport, MazeSlot, StepObserver};
use crate::io::configuration::{
    DEFAULT_ANIMATION_DELAY_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH, GenerationConfig,
};
use crate::io::error::{Result, file_system_error};
use crate::io::progress::StepProgress;
use crate::io::text::{TextOptions, render_text};
use crate::spatial::grid::{GridSnapshot, StepPhase};
use crate::spatial::placement::StartingPointMode;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "mazecarve")]
#[command(
    author,
    version,
    about = "Generate and solve mazes with randomized recursive backtracking"
)]
/// Command-line arguments for the maze generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Maze width in grid cells (rounded up to odd)
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Maze height in grid cells (rounded up to odd)
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Treat width and height as counts of carvable cells instead of grid cells
    #[arg(short, long)]
    pub cells: bool,

    /// Where the entry and exit are opened: top, side, topleft, lefttop, random or none
    #[arg(short, long, default_value_t = StartingPointMode::Top)]
    pub mode: StartingPointMode,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Redraw the maze after every carve and solve step
    #[arg(short, long)]
    pub animate: bool,

    /// Pause between animation steps in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_ANIMATION_DELAY_MS)]
    pub delay: u64,

    /// Draw the solution route as plain path
    #[arg(long)]
    pub hide_solution: bool,

    /// Draw the entry and exit as plain path
    #[arg(long)]
    pub hide_entry_exit: bool,

    /// Write the final maze to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log session lifecycle events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the arguments into a generation config
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are out of range
    pub fn config(&self) -> Result<GenerationConfig> {
        let mut config = if self.cells {
            GenerationConfig::from_cells(self.width, self.height, self.mode)?
        } else {
            GenerationConfig::new(self.width, self.height, self.mode)?
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.animate {
            config = config.with_animation(Duration::from_millis(self.delay));
        }

        Ok(config)
    }

    /// Display toggles derived from the flags and requested mode
    pub const fn text_options(&self) -> TextOptions {
        TextOptions::for_mode(!self.hide_solution, !self.hide_entry_exit, self.mode)
    }
}

/// Install the stderr log subscriber
///
/// Only warnings are shown unless `verbose` is set. A second call is a no-op.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Feeds session snapshots to the spinner and, when animating, the terminal
struct TerminalObserver {
    progress: StepProgress,
    animation: Option<TextOptions>,
}

impl StepObserver for TerminalObserver {
    fn on_step(&mut self, snapshot: &GridSnapshot) {
        self.progress.record(snapshot.phase);

        if snapshot.phase == StepPhase::Final {
            self.progress.finish();
            return;
        }

        if let Some(options) = self.animation {
            let frame = render_text(snapshot, options);
            self.progress.suspend(|| {
                let mut stdout = std::io::stdout().lock();
                // Clear screen and home the cursor before each frame
                let _ = write!(stdout, "\x1b[2J\x1b[H{frame}");
                let _ = stdout.flush();
            });
        }
    }
}

/// Runs one generation from parsed arguments and writes the result
pub struct MazeRunner {
    cli: Cli,
    slot: MazeSlot,
}

impl MazeRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            slot: MazeSlot::new(),
        }
    }

    /// Generate, solve and write the maze
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The arguments fail validation
    /// - The session worker panics
    /// - The output cannot be written
    pub fn run(&mut self) -> Result<MazeReport> {
        let config = self.cli.config()?;
        let options = self.cli.text_options();

        let progress = if self.cli.should_show_progress() {
            StepProgress::new("generating")
        } else {
            StepProgress::hidden()
        };
        let observer = TerminalObserver {
            progress,
            animation: self.cli.animate.then_some(options),
        };

        let report = self.slot.start(&config, observer).join()?;
        tracing::info!(
            seed = report.seed,
            mode = %report.mode,
            outcome = ?report.outcome,
            "generation finished"
        );

        let text = render_text(&report.snapshot, options);
        match &self.cli.output {
            Some(path) => std::fs::write(path, &text)
                .map_err(|source| file_system_error(path, "write", source))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(report)
    }
}
