//! Album, item and variant representation.

use std::fmt;

/// Label of the highest-fidelity rendition of an item.
pub const ORIGINAL_VARIANT: &str = "Original";

/// A named remote collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Album {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
        }
    }
}

/// A single media entry belonging to one album.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
        }
    }
}

/// A named rendition of an item's binary asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub label: String,
    pub url: String,
}

impl Variant {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Whether this is the "Original" rendition.
    pub fn is_original(&self) -> bool {
        self.label == ORIGINAL_VARIANT
    }
}

/// Resolved URL of an item's binary content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocation(String);

impl AssetLocation {
    /// Returns `None` for an empty URL.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick the location of the first "Original" variant, if any.
pub fn select_original(variants: &[Variant]) -> Option<AssetLocation> {
    variants
        .iter()
        .find(|v| v.is_original())
        .and_then(|v| AssetLocation::new(v.url.clone()))
}
