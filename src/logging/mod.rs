//! Logging for the dataset splitter
//!
//! - Bracketed line format shared by every output
//! - Stdout always, plus an optional timestamped log file

mod formatter;
mod setup;

pub use setup::setup_logging;
