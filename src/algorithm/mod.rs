/// Cooperative cancellation shared between a session and its owner
pub mod cancellation;
/// Randomized recursive-backtracking maze carving
pub mod carver;
/// Seeded random choices used during generation
pub mod random;
/// Orchestration of carving, placement and solving
pub mod session;
/// Backtracking route search between entry and exit
pub mod solver;
