//! Filesystem module.
//!
//! Provides the local backup layout and idempotent directory creation.

pub mod paths;

pub use paths::{album_dir, ensure_album_directory, item_path, sanitize_path_component};
