//! Statistics reporting.

use console::style;

use crate::download::RunSummary;

/// Print the final summary of a run.
pub fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    if summary.is_complete() {
        println!(
            "{} (elapsed time: {:.2?}; total errors: {})",
            style("ALL DONE").green().bold(),
            summary.elapsed,
            summary.global_errors
        );
    } else {
        println!(
            "{} (elapsed time: {:.2?}; total errors: {})",
            style("STOPPED").yellow().bold(),
            summary.elapsed,
            summary.global_errors
        );
    }
    println!(
        "  Started:  {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Albums:   {}/{} finished",
        summary.albums_completed, summary.total_albums
    );
    println!("  Items:    {} processed", summary.items_completed);
    for album in summary.albums.iter().filter(|a| a.errors > 0 || a.enumeration_error.is_some()) {
        match &album.enumeration_error {
            Some(error) => println!(
                "  {} {}: not listed ({})",
                style("!").red(),
                album.album_id,
                error
            ),
            None => println!(
                "  {} {}: {} of {} items failed",
                style("!").red(),
                album.album_id,
                album.errors,
                album.total_items
            ),
        }
    }
    println!("{}", style("═".repeat(50)).dim());
}
