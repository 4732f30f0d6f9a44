//! Library side of the `thrust` command-line tool.

pub mod logging;
pub mod options;
pub mod report;
