//! Progress lines and spinners.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::download::{DownloadOutcome, ItemStatus};

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// An album was enumerated and its downloads are starting.
pub fn print_album_started(album_id: &str, title: &str, item_count: usize) {
    println!(
        "{} Processing album {} [{}] (count: {})",
        style("->").cyan().bold(),
        album_id,
        title,
        item_count
    );
}

/// One item reached its terminal state.
pub fn print_item_processed(outcome: &DownloadOutcome, completed: usize, total: usize) {
    let status = match &outcome.status {
        ItemStatus::Succeeded => style(outcome.status.label()).green(),
        ItemStatus::Cancelled => style(outcome.status.label()).yellow(),
        _ => style(outcome.status.label()).red(),
    };
    println!(
        "{} Processed item {} ({}/{}) [{}] ... {}",
        style("-->").dim(),
        outcome.item_id,
        completed,
        total,
        outcome.title,
        status
    );
}

/// Every item of an album has reported.
pub fn print_album_finished(album_id: &str, total_items: usize, errors: usize) {
    let errors = if errors > 0 {
        style(errors).red()
    } else {
        style(errors).green()
    };
    println!();
    println!(
        "{} Finished processing all items ({}) for album {} [errors: {}]",
        style("++").green().bold(),
        total_items,
        album_id,
        errors
    );
    println!();
}
