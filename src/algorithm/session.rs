//! Generation sessions: carve, place and solve as one cancellable unit
//!
//! A session owns its grid outright. Superseding a session means cancelling
//! its token; the stale session notices at its next check and stops without
//! touching anything a newer session owns.

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::carver::{CarveOutcome, carve};
use crate::algorithm::random::RandomSelector;
use crate::algorithm::solver::{SolveOutcome, solve};
use crate::io::configuration::GenerationConfig;
use crate::io::error::{MazeError, Result};
use crate::spatial::grid::{Coordinate, Grid, GridSnapshot, StepPhase};
use crate::spatial::placement::{StartingPointMode, place_entry_exit};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Receives grid snapshots from a running session
pub trait StepObserver {
    /// Called after each carve or solve step when animation is requested,
    /// and once with the final grid
    fn on_step(&mut self, snapshot: &GridSnapshot);
}

impl<F> StepObserver for F
where
    F: FnMut(&GridSnapshot),
{
    fn on_step(&mut self, snapshot: &GridSnapshot) {
        self(snapshot);
    }
}

/// Observer that ignores every snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _snapshot: &GridSnapshot) {}
}

/// Lifecycle position of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, not yet run
    Idle,
    /// Carving passages
    Carving,
    /// Opening entry and exit
    Placing,
    /// Searching for the route
    Solving,
    /// Finished, whatever the solve result
    Done,
    /// Stopped by its token
    Cancelled,
}

/// Terminal result of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Route found and marked
    Solved {
        /// Cells from entry to exit inclusive
        path: Vec<Coordinate>,
    },
    /// Solve ran and exhausted the maze without reaching the exit
    NoPath,
    /// Resolved mode was `None`, so no solve was attempted
    Unsolved,
    /// The token was cancelled before the session finished
    Cancelled,
}

/// Everything a finished or cancelled session produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeReport {
    /// Grid as it stood when the session stopped
    pub snapshot: GridSnapshot,
    /// Mode after resolving `Random`; the requested mode if placement never ran
    pub mode: StartingPointMode,
    /// Seed every random draw came from
    pub seed: u64,
    /// Number of cells opened by carving
    pub opened: usize,
    /// How the session ended
    pub outcome: SessionOutcome,
}

impl MazeReport {
    /// Whether the session stopped because of cancellation
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.outcome, SessionOutcome::Cancelled)
    }
}

/// One maze generation: grid, randomness, endpoints and cancellation flag
#[derive(Debug)]
pub struct GenerationSession {
    grid: Grid,
    selector: RandomSelector,
    token: CancellationToken,
    state: SessionState,
    phase: StepPhase,
    requested_mode: StartingPointMode,
    resolved_mode: Option<StartingPointMode>,
    entry: Option<Coordinate>,
    exit: Option<Coordinate>,
    animation: Option<Duration>,
    opened: usize,
    outcome: Option<SessionOutcome>,
}

impl GenerationSession {
    /// Prepare a session; nothing is carved until `run`
    ///
    /// Draws a seed from the OS when the configuration does not fix one.
    pub fn new(config: &GenerationConfig, token: CancellationToken) -> Self {
        let seed = config.seed().unwrap_or_else(rand::random);

        Self {
            grid: Grid::new(config.width(), config.height()),
            selector: RandomSelector::new(seed),
            token,
            state: SessionState::Idle,
            phase: StepPhase::Carve,
            requested_mode: config.mode(),
            resolved_mode: None,
            entry: None,
            exit: None,
            animation: config.animation(),
            opened: 0,
            outcome: None,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Grid owned by this session
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seed of this session's random stream
    pub const fn seed(&self) -> u64 {
        self.selector.seed()
    }

    /// Token that cancels this session
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Entry cell once placed
    pub const fn entry(&self) -> Option<Coordinate> {
        self.entry
    }

    /// Exit cell once placed
    pub const fn exit(&self) -> Option<Coordinate> {
        self.exit
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, seed = self.seed(), "session transition");
        self.state = next;
        self.phase = match next {
            SessionState::Solving => StepPhase::Solve,
            SessionState::Done => StepPhase::Final,
            SessionState::Idle
            | SessionState::Carving
            | SessionState::Placing
            | SessionState::Cancelled => self.phase,
        };
    }

    /// Drive the session from `Idle` to `Done` or `Cancelled`
    ///
    /// A session runs once; calling `run` again reports the stored result
    /// without touching the grid or the observer.
    pub fn run<O>(&mut self, observer: &mut O) -> MazeReport
    where
        O: StepObserver + ?Sized,
    {
        if self.state != SessionState::Idle {
            return self.report();
        }

        self.transition(SessionState::Carving);
        let carved = {
            let Self {
                grid,
                selector,
                token,
                animation,
                ..
            } = self;
            let emit = step_emitter(observer, token, *animation, StepPhase::Carve, None, None);
            carve(grid, selector, token, emit)
        };

        match carved {
            CarveOutcome::Completed { opened, .. } if self.token.is_active() => {
                self.opened = opened;
            }
            CarveOutcome::Completed { .. } | CarveOutcome::Cancelled => {
                return self.cancel_now();
            }
        }

        self.transition(SessionState::Placing);
        let placement = place_entry_exit(
            &mut self.grid,
            self.requested_mode,
            self.selector.rng_mut(),
        );
        self.resolved_mode = Some(placement.mode);
        self.entry = placement.entry;
        self.exit = placement.exit;
        info!(
            requested = %self.requested_mode,
            resolved = %placement.mode,
            seed = self.seed(),
            "entry and exit placed"
        );

        let outcome = if placement.endpoints().is_some() {
            self.transition(SessionState::Solving);
            let solved = {
                let Self {
                    grid,
                    token,
                    animation,
                    ..
                } = self;
                let emit = step_emitter(
                    observer,
                    token,
                    *animation,
                    StepPhase::Solve,
                    placement.entry,
                    placement.exit,
                );
                solve(grid, &placement, token, emit)
            };

            match solved {
                SolveOutcome::Found { path } => SessionOutcome::Solved { path },
                SolveOutcome::NoPath => SessionOutcome::NoPath,
                SolveOutcome::Skipped => SessionOutcome::Unsolved,
                SolveOutcome::Cancelled => return self.cancel_now(),
            }
        } else {
            SessionOutcome::Unsolved
        };

        if self.token.is_cancelled() {
            return self.cancel_now();
        }

        self.transition(SessionState::Done);
        self.outcome = Some(outcome);
        let report = self.report();
        observer.on_step(&report.snapshot);
        report
    }

    fn cancel_now(&mut self) -> MazeReport {
        info!(state = ?self.state, seed = self.seed(), "session cancelled");
        self.transition(SessionState::Cancelled);
        self.outcome = Some(SessionOutcome::Cancelled);
        self.report()
    }

    fn report(&self) -> MazeReport {
        MazeReport {
            snapshot: self.grid.snapshot(self.phase, self.entry, self.exit),
            mode: self.resolved_mode.unwrap_or(self.requested_mode),
            seed: self.seed(),
            opened: self.opened,
            outcome: self
                .outcome
                .clone()
                .unwrap_or(SessionOutcome::Cancelled),
        }
    }
}

/// Build the per-step hook shared by carving and solving
///
/// Emits nothing unless animation was requested, and nothing once the token
/// is cancelled.
fn step_emitter<'a, O>(
    observer: &'a mut O,
    token: &'a CancellationToken,
    animation: Option<Duration>,
    phase: StepPhase,
    entry: Option<Coordinate>,
    exit: Option<Coordinate>,
) -> impl FnMut(&Grid) + 'a
where
    O: StepObserver + ?Sized + 'a,
{
    move |grid: &Grid| {
        let Some(delay) = animation else {
            return;
        };
        if token.is_cancelled() {
            return;
        }
        observer.on_step(&grid.snapshot(phase, entry, exit));
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Handle on a session running on its own thread
#[derive(Debug)]
pub struct SessionHandle {
    token: CancellationToken,
    worker: JoinHandle<MazeReport>,
}

impl SessionHandle {
    /// Ask the session to stop at its next check point
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the session was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the worker thread has returned
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the session to stop and take its report
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread panicked
    pub fn join(self) -> Result<MazeReport> {
        self.worker.join().map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            MazeError::WorkerPanicked { message }
        })
    }
}

fn spawn_session<O>(session: GenerationSession, mut observer: O) -> SessionHandle
where
    O: StepObserver + Send + 'static,
{
    let token = session.token().clone();
    let worker = thread::spawn(move || {
        let mut session = session;
        session.run(&mut observer)
    });
    SessionHandle { token, worker }
}

/// Start a standalone session on a background thread
pub fn start_generation<O>(config: &GenerationConfig, observer: O) -> SessionHandle
where
    O: StepObserver + Send + 'static,
{
    spawn_session(
        GenerationSession::new(config, CancellationToken::new()),
        observer,
    )
}

/// Cancel the session behind `handle`
pub fn cancel(handle: &SessionHandle) {
    handle.cancel();
}

/// Logical maze position holding at most one live session
///
/// Starting a new session cancels the previous one before the new session
/// is even constructed.
#[derive(Debug, Default)]
pub struct MazeSlot {
    current: Option<CancellationToken>,
}

impl MazeSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever session currently occupies the slot
    pub fn cancel_current(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!("cancelling superseded session");
            previous.cancel();
        }
    }

    /// Supersede the current session with a new one, returned unstarted
    pub fn prepare(&mut self, config: &GenerationConfig) -> GenerationSession {
        self.cancel_current();
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        GenerationSession::new(config, token)
    }

    /// Supersede the current session and run the new one on a background thread
    pub fn start<O>(&mut self, config: &GenerationConfig, observer: O) -> SessionHandle
    where
        O: StepObserver + Send + 'static,
    {
        spawn_session(self.prepare(config), observer)
    }
}
