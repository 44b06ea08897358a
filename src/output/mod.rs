//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Per-album and per-item progress lines
//! - Run summary reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use progress::{
    create_spinner, print_album_finished, print_album_started, print_item_processed,
};
pub use stats::print_run_summary;
