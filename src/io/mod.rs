/// Command-line interface and batch file processing
pub mod cli;
/// Constants shared across the crate
pub mod configuration;
/// Error types
pub mod error;
/// Label image PNG import and export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Batch progress display
pub mod progress;
/// Recorder for intermediate pipeline arrays
pub mod recorder;
/// In-memory hierarchical array store
pub mod store;
