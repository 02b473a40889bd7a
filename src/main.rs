//! classdemo: Classroom Demo CLI Tool
//!
//! A command-line tool for running classroom demos from JSON assets,
//! recording the answers, and exporting the stored results to CSV.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use classdemo::assets::{resolve_asset, AssetKind};
use classdemo::cli::{Cli, Commands, TerminalPrompter};
use classdemo::export::{run_export, ExportOptions};
use classdemo::question::run_question;
use classdemo::record::run_record;
use classdemo::utils::{
    init_logging, print_banner, print_completion, print_info, print_locations, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Question { name } => {
            let asset = resolve_asset(&cli.assets, AssetKind::Question, &name);
            run_question(&asset.path, &asset.base_dir, &mut rand::thread_rng())
        }
        Commands::Record { name, store } => {
            let asset = resolve_asset(&cli.assets, AssetKind::Record, &name);
            match run_record(&asset, &store, &mut TerminalPrompter)? {
                Some(path) => print_info(&format!("Result stored to {}", path.display())),
                None => print_info("Result not stored"),
            }
            Ok(())
        }
        Commands::Export {
            name,
            export,
            store,
            filter,
        } => {
            let asset = resolve_asset(&cli.assets, AssetKind::Export, &name);

            print_banner("classdemo export", env!("CARGO_PKG_VERSION"));
            print_locations(&store, &export);
            println!();

            let start = Instant::now();
            let summary = run_export(&ExportOptions {
                asset,
                store_dir: store,
                export_dir: export,
                filter,
            })?;
            print_success(&format!(
                "Exported {} row(s) in {:.2}s",
                summary.rows_written,
                start.elapsed().as_secs_f64()
            ));

            summary.display();
            print_completion("Export complete!");
            Ok(())
        }
        Commands::Version => {
            println!("{}", style("CLASSDEMO CLI").green());
            println!(
                "{}",
                style(format!("{:<10}{}", "Version: ", env!("CARGO_PKG_VERSION"))).cyan()
            );
            println!(
                "{}",
                style(format!("{:<10}{}", "Commit: ", classdemo::COMMIT)).cyan()
            );
            Ok(())
        }
    }
}
