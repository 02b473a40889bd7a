//! Terminal styling utilities: sections, prefixed messages and the banner

use console::{style, Emoji, StyledObject};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DONE: Emoji<'_, '_> = Emoji("👌 ", "[x] ");

/// Severity of a prefixed message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl PrefixLevel {
    fn label(&self) -> StyledObject<&'static str> {
        match self {
            PrefixLevel::Debug => style(" DEBUG ").black().on_white(),
            PrefixLevel::Info => style(" INFO  ").black().on_cyan(),
            PrefixLevel::Success => style("SUCCESS").black().on_green(),
            PrefixLevel::Warning => style("WARNING").black().on_yellow(),
            PrefixLevel::Error => style(" ERROR ").white().on_red(),
        }
    }
}

/// Print the application banner
pub fn print_banner(name: &str, version: &str) {
    println!();
    println!("    {}", style(name).cyan().bold());
    println!(
        "    {}",
        style("Classroom demos as simple as a JSON file").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a section header; deeper levels get more `#` marks
pub fn print_section(level: usize, title: &str) {
    let level = level.max(1);
    println!();
    println!(
        "{} {}",
        style("#".repeat(level)).cyan().bold(),
        style(title).white().bold()
    );
    println!("{}", style("─".repeat(50)).dim());
}

/// Print a message behind a colored level prefix
pub fn print_prefixed(level: PrefixLevel, message: &str) {
    println!(" {} {}", level.label(), message);
}

/// Print a message behind a custom text prefix, e.g. a question id
pub fn print_labeled(label: &str, message: &str) {
    println!(" {} {}", style(label).black().on_cyan(), style(message).cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {} {}", ROCKET, style(message).green().bold());
    println!();
}

/// Print the input and output locations of a command
pub fn print_locations(input: &Path, output: &Path) {
    println!("    {} From: {}", FOLDER, style(truncate_path(input, 48)).dim());
    println!("    {} To:   {}", SAVE, style(truncate_path(output, 48)).dim());
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
