//! Export summary report

use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::export::ExportStats;

/// Summary of one export run
#[derive(Debug)]
pub struct ExportSummary {
    pub export_name: String,
    pub output: PathBuf,
    pub stats: ExportStats,
    pub rows_written: usize,
}

impl ExportSummary {
    pub fn new(export_name: &str, output: PathBuf, stats: ExportStats, rows_written: usize) -> Self {
        Self {
            export_name: export_name.to_string(),
            output,
            stats,
            rows_written,
        }
    }

    /// Build the summary table without printing it.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Result Files"),
            Cell::new(self.stats.documents),
        ]);

        table.add_row(vec![
            Cell::new("🔗 Rows Merged"),
            Cell::new(self.stats.rows_merged),
        ]);

        table.add_row(vec![
            Cell::new("⚠️  Keys Skipped"),
            Cell::new(self.stats.skipped_keys).fg(if self.stats.skipped_keys == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("✅ Rows Exported"),
            Cell::new(self.rows_written)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("💾 Output"),
            Cell::new(self.output.display()),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style(format!("EXPORT SUMMARY: {}", self.export_name)).white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
    }
}
