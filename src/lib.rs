//! Album Backup - mirror remote photo albums to local storage.
//!
//! This library backs up one page of a user's albums: every album is
//! enumerated, every item's "Original" rendition is downloaded into
//! `<backup root>/<album id>/<item id>.jpg`, and progress is aggregated from
//! the concurrently running downloads.
//!
//! # Features
//!
//! - Concurrent album and item processing with a bounded download pool
//! - Bounded per-item retries on top of HTTP-level exponential backoff
//! - Per-album and global progress and error accounting
//! - Cancellation through Ctrl-C or a run deadline
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use album_backup::api::{CollectionApi, ConfigCredentialProvider, CredentialProvider, RestCollectionApi, TransportClient};
//! use album_backup::{AssetFetcher, Config, Pipeline, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let credential = ConfigCredentialProvider::new(config.account.clone()).current_credential()?;
//!     let transport = TransportClient::new(config.request_timeout(), 5, Duration::from_secs(1))?;
//!     let api: Arc<dyn CollectionApi> = Arc::new(RestCollectionApi::new(
//!         transport.clone(),
//!         config.options.api_base.clone(),
//!         config.account.api_key.clone(),
//!         credential,
//!     ));
//!
//!     let user = api.login().await?;
//!     let albums = api.list_albums(&user.id, 1, 10).await?;
//!     let fetcher = AssetFetcher::new(api.clone(), transport, config.backup_directory(), RetryPolicy::default());
//!     let summary = Pipeline::new(api, fetcher, 8).run(albums, true).await;
//!     println!("{} errors", summary.global_errors);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{CollectionApi, Credential, RestCollectionApi};
pub use config::Config;
pub use download::{
    AlbumEnumerator, AssetFetcher, DownloadOutcome, ItemStatus, Pipeline, PipelineEvent,
    ProgressAggregator, RetryPolicy, RunSummary,
};
pub use error::{Error, Result};
pub use media::{Album, Item, Variant};
