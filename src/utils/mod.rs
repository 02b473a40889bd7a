//! Shared terminal helpers: styling, progress, logging and inline images

pub mod imgcat;
pub mod logging;
pub mod progress;
pub mod styling;

pub use imgcat::*;
pub use logging::*;
pub use progress::*;
pub use styling::*;
