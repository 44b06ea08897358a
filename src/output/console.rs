//! Console output utilities.

use std::path::Path;

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Album Backup                                      ║
║     Mirror your remote photo albums locally           ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(page: u32, albums_per_run: u32, concurrency: usize, backup_dir: &Path) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Page: {}", page);
    println!("  Albums per run: {}", albums_per_run);
    println!("  Concurrent downloads: {}", concurrency);
    println!("  Directory: {}", backup_dir.display());
    println!();
}
