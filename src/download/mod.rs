//! Download module for the backup pipeline.
//!
//! This module provides:
//! - Bounded retries (`RetryPolicy`)
//! - Item asset resolution and download (`AssetFetcher`)
//! - Album item enumeration (`AlbumEnumerator`)
//! - The concurrent orchestrator (`Pipeline`)
//! - Progress aggregation and completion detection (`ProgressAggregator`)

pub mod aggregator;
pub mod enumerator;
pub mod events;
pub mod fetcher;
pub mod pipeline;
pub mod retry;

pub use aggregator::{AlbumProgress, AlbumSummary, ProgressAggregator, ProgressCounters, RunSummary};
pub use enumerator::{AlbumEnumerator, AlbumListing};
pub use events::{DownloadOutcome, ItemStatus, PipelineEvent};
pub use fetcher::AssetFetcher;
pub use pipeline::{Pipeline, DEFAULT_MAX_CONCURRENT_DOWNLOADS};
pub use retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
