//! classdemo: Classroom Demo Library
//!
//! Drives interactive demo scripts, records the answers as JSON result
//! documents, and exports stored results to CSV through regex-based rules.

pub mod assets;
pub mod cli;
pub mod export;
pub mod question;
pub mod record;
pub mod report;
pub mod utils;

/// Git commit the binary was built from
pub const COMMIT: &str = env!("CLASSDEMO_COMMIT");
