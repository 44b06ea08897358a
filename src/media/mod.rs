//! Media module for album, item and variant representation.

pub mod album;

pub use album::{select_original, Album, AssetLocation, Item, Variant, ORIGINAL_VARIANT};
