//! Export module - turns stored result documents into a CSV table
//!
//! An export configuration maps result keys to columns (titles) and to value
//! transformations (rules). Each result document is classified, spread over
//! the group's rows, and merged into the rows of earlier documents that share
//! the same key columns. The final table is sorted and written as CSV.

pub mod command;
pub mod engine;
pub mod error;
pub mod loader;
pub mod sort;
pub mod spec;
pub mod writer;

pub use command::*;
pub use engine::*;
pub use error::{ExportError, Result};
pub use loader::*;
pub use sort::*;
pub use spec::*;
pub use writer::*;
