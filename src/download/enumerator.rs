//! Album item enumeration.

use std::sync::Arc;

use crate::api::CollectionApi;
use crate::error::{Error, Result};
use crate::media::Item;

/// Items of one album, with the count known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumListing {
    pub items: Vec<Item>,
    pub item_count: usize,
}

/// Resolves an album to its ordered list of items.
///
/// Only the first page returned by the API is used; albums larger than
/// one page are truncated.
#[derive(Clone)]
pub struct AlbumEnumerator {
    api: Arc<dyn CollectionApi>,
}

impl AlbumEnumerator {
    pub fn new(api: Arc<dyn CollectionApi>) -> Self {
        Self { api }
    }

    pub async fn list_items(&self, album_id: &str) -> Result<AlbumListing> {
        let items = self
            .api
            .list_items(album_id)
            .await
            .map_err(|e| Error::Enumeration {
                album_id: album_id.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Album {} has {} items", album_id, items.len());

        Ok(AlbumListing {
            item_count: items.len(),
            items,
        })
    }
}
