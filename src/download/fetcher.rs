//! Item asset resolution and downloading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::{CollectionApi, TransportClient};
use crate::download::events::{DownloadOutcome, ItemStatus};
use crate::download::retry::RetryPolicy;
use crate::error::{Error, Result};
use crate::fs::{ensure_album_directory, item_path};
use crate::media::{select_original, AssetLocation, Item};

/// Resolves items to their "Original" asset and stores it under the backup root.
pub struct AssetFetcher {
    api: Arc<dyn CollectionApi>,
    transport: TransportClient,
    root: PathBuf,
    retry: RetryPolicy,
}

impl AssetFetcher {
    pub fn new(
        api: Arc<dyn CollectionApi>,
        transport: TransportClient,
        root: impl Into<PathBuf>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api,
            transport,
            root: root.into(),
            retry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up the URL of the item's "Original" variant.
    ///
    /// `Ok(None)` means the item has no such variant.
    pub async fn resolve_location(&self, item: &Item) -> Result<Option<AssetLocation>> {
        let variants = self.api.list_variants(&item.id).await?;
        Ok(select_original(&variants))
    }

    /// Like [`resolve_location`](Self::resolve_location), with a missing variant as an error.
    async fn locate(&self, item: &Item) -> Result<AssetLocation> {
        self.resolve_location(item)
            .await?
            .ok_or_else(|| Error::NoOriginalVariant {
                item_id: item.id.clone(),
            })
    }

    /// Stream `location` into `destination`, replacing any previous file.
    ///
    /// Returns the number of bytes written.
    pub async fn download(&self, destination: &Path, location: &AssetLocation) -> Result<u64> {
        let response = self.transport.get(location.as_str(), &[]).await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                location,
                response.status()
            )));
        }

        let mut file = File::create(destination)
            .await
            .map_err(|e| Error::filesystem(destination, e))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::filesystem(destination, e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| Error::filesystem(destination, e))?;

        Ok(written)
    }

    /// Run the full item sequence: resolve, ensure directory, download with retries.
    ///
    /// Never fails; every error ends up in the returned outcome.
    pub async fn fetch_item(&self, album_id: &str, item: &Item) -> DownloadOutcome {
        let location = match self.locate(item).await {
            Ok(location) => location,
            Err(Error::NoOriginalVariant { .. }) => {
                tracing::warn!("Item {} in album {} has no Original variant", item.id, album_id);
                return DownloadOutcome::new(album_id, item, ItemStatus::NoAsset, 0);
            }
            Err(e) => {
                tracing::warn!("Failed to resolve item {}: {}", item.id, e);
                return DownloadOutcome::new(
                    album_id,
                    item,
                    ItemStatus::TransportFailed(e.to_string()),
                    0,
                );
            }
        };

        let destination = match self.prepare_destination(album_id, &item.id).await {
            Ok(path) => path,
            Err(e) => {
                return DownloadOutcome::new(
                    album_id,
                    item,
                    ItemStatus::FilesystemFailed(e.to_string()),
                    0,
                );
            }
        };

        let mut attempts = 0;
        let result = self
            .retry
            .attempt(|attempt| {
                attempts = attempt;
                self.download(&destination, &location)
            })
            .await;

        match result {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} ({} bytes)", destination.display(), bytes);
                DownloadOutcome::new(album_id, item, ItemStatus::Succeeded, attempts)
            }
            Err(e) => {
                tracing::warn!(
                    "Error downloading item {}, {}: {}",
                    item.id,
                    location,
                    e
                );
                let status = if e.is_filesystem() {
                    ItemStatus::FilesystemFailed(e.to_string())
                } else {
                    ItemStatus::TransportFailed(e.to_string())
                };
                DownloadOutcome::new(album_id, item, status, attempts)
            }
        }
    }

    async fn prepare_destination(&self, album_id: &str, item_id: &str) -> Result<PathBuf> {
        let path = item_path(&self.root, album_id, item_id)?;
        ensure_album_directory(&self.root, album_id).await?;
        Ok(path)
    }
}
