//! Step counting spinner for a running generation session

use crate::io::configuration::PROGRESS_TICK_MS;
use crate::spatial::grid::StepPhase;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Spinner reporting carve and solve step counts
///
/// Hidden spinners accept every call and draw nothing, so callers never
/// branch on quiet mode.
pub struct StepProgress {
    bar: ProgressBar,
    carve_steps: usize,
    solve_steps: usize,
}

impl StepProgress {
    /// Create a visible spinner
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Self::with_bar(bar)
    }

    /// Create a spinner that never draws
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    const fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            carve_steps: 0,
            solve_steps: 0,
        }
    }

    /// Count a step from `phase` and refresh the message
    pub fn record(&mut self, phase: StepPhase) {
        match phase {
            StepPhase::Carve => self.carve_steps += 1,
            StepPhase::Solve => self.solve_steps += 1,
            StepPhase::Final => {}
        }
        self.bar.set_message(format!(
            "{phase}: {} carve steps, {} solve steps",
            self.carve_steps, self.solve_steps
        ));
        self.bar.tick();
    }

    /// Carve steps seen so far
    pub const fn carve_steps(&self) -> usize {
        self.carve_steps
    }

    /// Solve steps seen so far
    pub const fn solve_steps(&self) -> usize {
        self.solve_steps
    }

    /// Run `f` with the spinner temporarily cleared from the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Remove the spinner
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
