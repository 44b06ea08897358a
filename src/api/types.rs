//! API response type definitions.

use serde::Deserialize;

use crate::media::{Album, Item, Variant};

/// Status envelope present on every response.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub stat: String,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.stat == "ok"
    }
}

/// Text node wrapper (`{"_content": "..."}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(rename = "_content", default)]
    pub content: String,
}

/// Response of the login check.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: User,
}

/// The authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Content,
}

/// Response of the album listing.
#[derive(Debug, Deserialize)]
pub struct AlbumsResponse {
    pub photosets: AlbumPage,
}

/// One page of albums.
#[derive(Debug, Deserialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub photoset: Vec<AlbumEntry>,
}

/// Album entry of the album listing.
#[derive(Debug, Deserialize)]
pub struct AlbumEntry {
    pub id: String,
    #[serde(default)]
    pub title: Content,
    #[serde(default)]
    pub description: Content,
}

impl From<AlbumEntry> for Album {
    fn from(entry: AlbumEntry) -> Self {
        Album {
            id: entry.id,
            title: entry.title.content,
            description: entry.description.content,
        }
    }
}

/// Response of the items-of-album call.
#[derive(Debug, Deserialize)]
pub struct ItemsResponse {
    pub photoset: ItemPage,
}

/// Items of one album.
#[derive(Debug, Deserialize)]
pub struct ItemPage {
    pub id: String,
    #[serde(default)]
    pub photo: Vec<ItemEntry>,
}

/// Item entry.
#[derive(Debug, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<ItemEntry> for Item {
    fn from(entry: ItemEntry) -> Self {
        Item {
            id: entry.id,
            title: entry.title,
            description: entry.description,
        }
    }
}

/// Response of the variant listing.
#[derive(Debug, Deserialize)]
pub struct VariantsResponse {
    pub sizes: VariantList,
}

/// Variants of one item.
#[derive(Debug, Deserialize)]
pub struct VariantList {
    #[serde(default)]
    pub size: Vec<VariantEntry>,
}

/// Variant entry.
#[derive(Debug, Deserialize)]
pub struct VariantEntry {
    pub label: String,
    pub source: String,
}

impl From<VariantEntry> for Variant {
    fn from(entry: VariantEntry) -> Self {
        Variant {
            label: entry.label,
            url: entry.source,
        }
    }
}
