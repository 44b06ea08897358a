//! Events flowing from album and item tasks to the progress aggregator.

use std::fmt;

use crate::media::Item;

/// Terminal state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// The asset was written to its destination.
    Succeeded,
    /// The item has no "Original" variant; nothing was downloaded.
    NoAsset,
    /// Variant lookup or download failed on the network side.
    TransportFailed(String),
    /// The album directory or the destination file could not be written.
    FilesystemFailed(String),
    /// The run was cancelled before the item completed.
    Cancelled,
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Succeeded)
    }

    /// Short label used in progress lines.
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Succeeded => "OK",
            ItemStatus::NoAsset => "FAIL (no original)",
            ItemStatus::TransportFailed(_) => "FAIL (transport)",
            ItemStatus::FilesystemFailed(_) => "FAIL (filesystem)",
            ItemStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::TransportFailed(reason) | ItemStatus::FilesystemFailed(reason) => {
                write!(f, "{}: {}", self.label(), reason)
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Result of one item's resolve/download sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub album_id: String,
    pub item_id: String,
    pub title: String,
    pub status: ItemStatus,
    /// Download attempts made (0 when the download step was never reached).
    pub attempts: u32,
}

impl DownloadOutcome {
    pub fn new(album_id: &str, item: &Item, status: ItemStatus, attempts: u32) -> Self {
        Self {
            album_id: album_id.to_string(),
            item_id: item.id.clone(),
            title: item.title.clone(),
            status,
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Message on the pipeline's event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// An album was enumerated; its item tasks start after this event.
    AlbumStarted {
        album_id: String,
        title: String,
        item_count: usize,
        /// Set when enumeration failed and the album contributes no items.
        enumeration_error: Option<String>,
    },
    /// One item reached its terminal state.
    ItemFinished(DownloadOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_succeeded_is_success() {
        assert!(ItemStatus::Succeeded.is_success());
        assert!(!ItemStatus::NoAsset.is_success());
        assert!(!ItemStatus::TransportFailed("x".into()).is_success());
        assert!(!ItemStatus::FilesystemFailed("x".into()).is_success());
        assert!(!ItemStatus::Cancelled.is_success());
    }

    #[test]
    fn test_display_keeps_reason() {
        let status = ItemStatus::TransportFailed("HTTP 503".into());
        assert_eq!(status.to_string(), "FAIL (transport): HTTP 503");
        assert_eq!(ItemStatus::NoAsset.to_string(), "FAIL (no original)");
    }
}
