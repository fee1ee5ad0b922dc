//! Tests for session lifecycle, observers and supersession

#[cfg(test)]
mod tests {
    use mazecarve::MazeError;
    use mazecarve::algorithm::cancellation::CancellationToken;
    use mazecarve::algorithm::session::{
        GenerationSession, MazeSlot, NoopObserver, SessionOutcome, SessionState, cancel,
        start_generation,
    };
    use mazecarve::io::configuration::GenerationConfig;
    use mazecarve::spatial::grid::{CellState, Coordinate, GridSnapshot, StepPhase};
    use mazecarve::spatial::placement::StartingPointMode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, mpsc};
    use std::time::Duration;

    fn config(size: usize, mode: StartingPointMode, seed: u64) -> GenerationConfig {
        GenerationConfig::new(size, size, mode)
            .expect("test dimensions are valid")
            .with_seed(seed)
    }

    fn run_standalone(config: &GenerationConfig) -> mazecarve::MazeReport {
        GenerationSession::new(config, CancellationToken::new()).run(&mut NoopObserver)
    }

    // Tests a 5x5 Side session opens the middle row ends and solves between them
    // Verified by placing Side at the raw middle row
    #[test]
    fn test_side_session_on_smallest_grid() {
        let config = config(5, StartingPointMode::Side, 17);
        let mut session = GenerationSession::new(&config, CancellationToken::new());

        let report = session.run(&mut NoopObserver);

        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(session.entry(), Some(Coordinate::new(3, 0)));
        assert_eq!(session.exit(), Some(Coordinate::new(3, 4)));
        assert_eq!(report.opened, 7);
        assert_eq!(report.snapshot.phase, StepPhase::Final);

        let SessionOutcome::Solved { path } = &report.outcome else {
            unreachable!("Expected a solved maze, got {:?}", report.outcome);
        };
        assert_eq!(path.first(), Some(&Coordinate::new(3, 0)));
        assert_eq!(path.last(), Some(&Coordinate::new(3, 4)));
        for pair in path.windows(2) {
            if let [from, to] = pair {
                assert_eq!(from.row.abs_diff(to.row) + from.col.abs_diff(to.col), 1);
            }
        }

        let marked = report
            .snapshot
            .rows
            .iter()
            .flatten()
            .filter(|&&state| state == CellState::Solution)
            .count();
        assert_eq!(marked, path.len());
    }

    // Tests None mode skips placement and solving
    // Verified by solving from the Top formula when mode is None
    #[test]
    fn test_none_mode_is_unsolved() {
        let config = config(11, StartingPointMode::None, 4);
        let mut session = GenerationSession::new(&config, CancellationToken::new());

        let report = session.run(&mut NoopObserver);

        assert_eq!(report.outcome, SessionOutcome::Unsolved);
        assert_eq!(report.mode, StartingPointMode::None);
        assert_eq!(report.snapshot.entry, None);
        assert_eq!(report.snapshot.exit, None);
        assert_eq!(session.grid().count(CellState::Solution), 0);
        assert_eq!(session.grid().count(CellState::Path), report.opened);
    }

    // Tests Random is resolved to a concrete mode reported back to the caller
    // Verified by reporting the requested mode
    #[test]
    fn test_random_mode_reports_resolution() {
        for seed in 0..20 {
            let report = run_standalone(&config(9, StartingPointMode::Random, seed));
            assert!(StartingPointMode::CONCRETE.contains(&report.mode));
            if report.mode == StartingPointMode::None {
                assert_eq!(report.outcome, SessionOutcome::Unsolved);
            } else {
                assert!(matches!(report.outcome, SessionOutcome::Solved { .. }));
            }
        }
    }

    // Tests without animation the observer sees only the final grid
    // Verified by emitting carve steps regardless of animation
    #[test]
    fn test_observer_sees_final_only() {
        let config = config(15, StartingPointMode::Top, 8);
        let mut phases = Vec::new();

        let report = GenerationSession::new(&config, CancellationToken::new())
            .run(&mut |snapshot: &GridSnapshot| phases.push(snapshot.phase));

        assert_eq!(phases, vec![StepPhase::Final]);
        assert!(matches!(report.outcome, SessionOutcome::Solved { .. }));
    }

    // Tests animated sessions emit carve steps, then solve steps, then the final grid
    // Verified by emitting the final snapshot before solving
    #[test]
    fn test_animated_phase_order() {
        let plain = config(11, StartingPointMode::TopLeft, 21);
        let animated = plain.with_animation(Duration::ZERO);
        let mut snapshots: Vec<GridSnapshot> = Vec::new();

        let report = GenerationSession::new(&animated, CancellationToken::new())
            .run(&mut |snapshot: &GridSnapshot| snapshots.push(snapshot.clone()));

        let carve_steps = snapshots
            .iter()
            .take_while(|snapshot| snapshot.phase == StepPhase::Carve)
            .count();
        let solve_steps = snapshots
            .iter()
            .skip(carve_steps)
            .take_while(|snapshot| snapshot.phase == StepPhase::Solve)
            .count();

        // 25 lattice cells joined by 24 carved pairs
        assert_eq!(carve_steps, 24);
        assert!(solve_steps > 0);
        assert_eq!(snapshots.len(), carve_steps + solve_steps + 1);
        assert_eq!(snapshots.last(), Some(&report.snapshot));

        let solve_frame = snapshots.get(carve_steps).expect("solve frames exist");
        assert_eq!(solve_frame.entry, Some(Coordinate::new(0, 1)));
        assert_eq!(solve_frame.exit, Some(Coordinate::new(10, 9)));

        assert_eq!(run_standalone(&plain), report, "Animation must not change the maze");
    }

    // Tests a session cancelled before running emits nothing and carves nothing
    // Verified by running carve before checking the token
    #[test]
    fn test_precancelled_session() {
        let config = config(11, StartingPointMode::Top, 2).with_animation(Duration::ZERO);
        let token = CancellationToken::new();
        token.cancel();
        let mut session = GenerationSession::new(&config, token);
        let mut calls = 0;

        let report = session.run(&mut |_: &GridSnapshot| calls += 1);

        assert_eq!(calls, 0);
        assert!(report.is_cancelled());
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.grid().count(CellState::Path), 0);
    }

    // Tests cancelling from the observer mid-solve leaves a cancelled report
    // Verified by emitting the final snapshot after cancellation
    #[test]
    fn test_cancel_during_solve() {
        let config = config(11, StartingPointMode::Top, 6).with_animation(Duration::ZERO);
        let token = CancellationToken::new();
        let mut session = GenerationSession::new(&config, token.clone());
        let mut phases = Vec::new();

        let report = session.run(&mut |snapshot: &GridSnapshot| {
            phases.push(snapshot.phase);
            if snapshot.phase == StepPhase::Solve {
                token.cancel();
            }
        });

        assert!(report.is_cancelled());
        assert_eq!(phases.last(), Some(&StepPhase::Solve));
        assert_eq!(
            phases.iter().filter(|&&phase| phase == StepPhase::Solve).count(),
            1
        );
        assert!(!phases.contains(&StepPhase::Final));
    }

    // Tests a second run reports the stored result without re-running
    // Verified by resetting the state to Idle after Done
    #[test]
    fn test_run_twice_is_stable() {
        let config = config(9, StartingPointMode::Side, 12);
        let mut session = GenerationSession::new(&config, CancellationToken::new());
        let mut calls = 0;

        let first = session.run(&mut |_: &GridSnapshot| calls += 1);
        let second = session.run(&mut |_: &GridSnapshot| calls += 1);

        assert_eq!(first, second);
        assert_eq!(calls, 1);
    }

    // Tests the same seed reproduces the same maze and route
    // Verified by drawing the Random resolution from entropy
    #[test]
    fn test_sessions_are_reproducible() {
        let config = config(31, StartingPointMode::Random, 1234);
        assert_eq!(run_standalone(&config), run_standalone(&config));
        assert_eq!(run_standalone(&config).seed, 1234);
    }

    // Tests preparing a new session cancels the one it supersedes
    // Verified by creating the new token before cancelling the old one
    #[test]
    fn test_slot_supersedes_previous() {
        let config = config(9, StartingPointMode::Top, 1);
        let mut slot = MazeSlot::new();

        let first = slot.prepare(&config);
        let second = slot.prepare(&config);

        assert!(first.token().is_cancelled());
        assert!(second.token().is_active());

        slot.cancel_current();
        assert!(second.token().is_cancelled());
    }

    // Tests background sessions can be joined for their report
    // Verified by returning before the worker finishes
    #[test]
    fn test_start_generation_joins() {
        let config = config(21, StartingPointMode::Top, 77);
        let handle = start_generation(&config, NoopObserver);

        let report = handle.join().expect("worker should not panic");

        assert_eq!(report, run_standalone(&config));
    }

    // Tests a superseded session stops after its in-flight step and leaves
    // the newer session's result identical to an undisturbed run
    // Verified by sharing one grid between the two sessions
    #[test]
    fn test_superseded_session_stops_cleanly() {
        let stale_config = config(21, StartingPointMode::Top, 1).with_animation(Duration::ZERO);
        let fresh_config = config(21, StartingPointMode::Side, 2);

        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let calls = Arc::new(AtomicUsize::new(0));
        let stale_calls = Arc::clone(&calls);

        let mut slot = MazeSlot::new();
        let stale = slot.start(&stale_config, move |_: &GridSnapshot| {
            if stale_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                let _ = started_tx.send(());
                let _ = release_rx.recv();
            }
        });

        started_rx.recv().expect("stale session should reach its first step");
        let fresh = slot.start(&fresh_config, NoopObserver);
        assert!(stale.is_cancelled());

        let fresh_report = fresh.join().expect("fresh session should finish");
        release_tx.send(()).expect("stale session is still waiting");
        let stale_report = stale.join().expect("stale session should stop");

        assert!(stale_report.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fresh_report, run_standalone(&fresh_config));
    }

    // Tests cancel through the free function reaches a running session
    // Verified by cancelling a cloned token that the session never sees
    #[test]
    fn test_cancel_handle() {
        let config = config(21, StartingPointMode::Top, 5).with_animation(Duration::ZERO);
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let mut first = true;

        let handle = start_generation(&config, move |_: &GridSnapshot| {
            if first {
                first = false;
                let _ = started_tx.send(());
                let _ = release_rx.recv();
            }
        });

        started_rx.recv().expect("session should reach its first step");
        cancel(&handle);
        release_tx.send(()).expect("session is still waiting");

        let report = handle.join().expect("session should stop");
        assert!(report.is_cancelled());
    }

    // Tests a panicking observer surfaces as an error rather than a panic in join
    // Verified by unwrapping the join result
    #[test]
    fn test_observer_panic_is_reported() {
        let config = config(9, StartingPointMode::Top, 3);
        let handle = start_generation(&config, |_: &GridSnapshot| {
            panic!("observer failed");
        });

        match handle.join() {
            Err(MazeError::WorkerPanicked { message }) => assert_eq!(message, "observer failed"),
            other => unreachable!("Expected WorkerPanicked, got {other:?}"),
        }
    }
}
