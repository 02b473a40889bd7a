//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assets::DEFAULT_ASSETS_DIR;
use crate::export::{DEFAULT_EXPORT_DIR, DEFAULT_FILTER};
use crate::record::DEFAULT_STORE_DIR;

/// classdemo - Run classroom demos, record answers and export results.
///
/// New demos and questions are added by writing JSON assets, no code needed.
#[derive(Parser, Debug)]
#[command(name = "classdemo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory of the question, record and export assets
    #[arg(long, global = true, default_value = DEFAULT_ASSETS_DIR)]
    pub assets: PathBuf,

    /// Print debug diagnostics (also enabled by CLASSDEMO_DEBUG=true)
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate list of questions for demo
    #[command(after_help = "Example: classdemo question example")]
    Question {
        /// Question asset name, or a path to a question JSON file
        name: String,
    },

    /// Start to record information and save the result into the store
    #[command(after_help = "Example: classdemo record example")]
    Record {
        /// Record asset name, or a path to a record JSON file
        name: String,

        /// The directory to store the result file
        #[arg(short, long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,
    },

    /// Export stored results with custom rules
    #[command(after_help = "Example: classdemo export example")]
    Export {
        /// Export asset name, or a path to an export JSON file
        name: String,

        /// The directory to store the exported csv files
        #[arg(short, long, default_value = DEFAULT_EXPORT_DIR)]
        export: PathBuf,

        /// The directory to load all result files
        #[arg(short, long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,

        /// The regex pattern to filter files
        #[arg(short, long, default_value = DEFAULT_FILTER)]
        filter: String,
    },

    /// Get version of the CLI
    Version,
}
