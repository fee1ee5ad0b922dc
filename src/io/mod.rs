/// Command-line interface and runner
pub mod cli;
/// Constants and validated generation parameters
pub mod configuration;
/// Error types for maze operations
pub mod error;
/// Terminal progress display
pub mod progress;
/// Text rendering of grid snapshots
pub mod text;
