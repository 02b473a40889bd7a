//! Report module - summarizing export results

pub mod summary;

pub use summary::*;
