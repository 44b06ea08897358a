//! Concurrent backup pipeline.
//!
//! One task per album enumerates its items, announces the album, then spawns
//! one task per item. Item downloads are gated by a global semaphore. Every
//! task reports to the aggregator through a single event channel.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::api::CollectionApi;
use crate::download::aggregator::{ProgressAggregator, RunSummary};
use crate::download::enumerator::AlbumEnumerator;
use crate::download::events::{DownloadOutcome, ItemStatus, PipelineEvent};
use crate::download::fetcher::AssetFetcher;
use crate::media::{Album, Item};

/// Capacity of the event channel.
const EVENT_BUFFER: usize = 256;

/// Default bound on concurrent item downloads.
pub const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 8;

/// Fans albums and items out to tasks and fans their events back in.
pub struct Pipeline {
    enumerator: AlbumEnumerator,
    fetcher: Arc<AssetFetcher>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(api: Arc<dyn CollectionApi>, fetcher: AssetFetcher, max_concurrent: usize) -> Self {
        Self {
            enumerator: AlbumEnumerator::new(api),
            fetcher: Arc::new(fetcher),
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            cancel: CancellationToken::new(),
        }
    }

    /// Token that cancels every listing and item still queued or in flight.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the run once `deadline` has elapsed.
    pub fn cancel_after(&self, deadline: Duration) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(deadline) => {
                    tracing::warn!("Run deadline of {:?} reached, cancelling", deadline);
                    cancel.cancel();
                }
            }
        });
    }

    /// Spawn one task per distinct album and return the event stream.
    ///
    /// The channel closes once every album and item task has reported.
    pub fn spawn(&self, albums: Vec<Album>) -> mpsc::Receiver<PipelineEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        for album in distinct_albums(albums) {
            let task = AlbumTask {
                enumerator: self.enumerator.clone(),
                fetcher: Arc::clone(&self.fetcher),
                semaphore: Arc::clone(&self.semaphore),
                cancel: self.cancel.clone(),
                events: tx.clone(),
            };
            tokio::spawn(task.run(album));
        }

        rx
    }

    /// Back up `albums` and wait until every item has reported.
    pub async fn run(&self, albums: Vec<Album>, show_progress: bool) -> RunSummary {
        let albums = distinct_albums(albums);
        let aggregator = ProgressAggregator::new(albums.len(), show_progress);
        let events = self.spawn(albums);
        aggregator.run(events).await
    }
}

/// Drop repeated album ids, keeping the first occurrence.
fn distinct_albums(albums: Vec<Album>) -> Vec<Album> {
    let mut seen = HashSet::new();
    albums
        .into_iter()
        .filter(|album| {
            let first = seen.insert(album.id.clone());
            if !first {
                tracing::warn!("Album {} listed twice, backing it up once", album.id);
            }
            first
        })
        .collect()
}

/// Everything an album task needs, owned so it can move into `tokio::spawn`.
struct AlbumTask {
    enumerator: AlbumEnumerator,
    fetcher: Arc<AssetFetcher>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    events: mpsc::Sender<PipelineEvent>,
}

impl AlbumTask {
    async fn run(self, album: Album) {
        // A cancelled listing still announces the album, with no items, so
        // the run can finish.
        let (items, enumeration_error) = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => (Vec::new(), Some("cancelled".to_string())),
            listing = self.enumerator.list_items(&album.id) => match listing {
                Ok(listing) => (listing.items, None),
                Err(e) => {
                    tracing::warn!("{}", e);
                    (Vec::new(), Some(e.to_string()))
                }
            },
        };

        // Item tasks are spawned only after the album is announced, so the
        // aggregator always knows the total before the first outcome.
        let started = PipelineEvent::AlbumStarted {
            album_id: album.id.clone(),
            title: album.title.clone(),
            item_count: items.len(),
            enumeration_error,
        };
        if self.events.send(started).await.is_err() {
            tracing::debug!("Event receiver gone, dropping album {}", album.id);
            return;
        }

        for item in items {
            tokio::spawn(item_task(
                album.id.clone(),
                item,
                Arc::clone(&self.fetcher),
                Arc::clone(&self.semaphore),
                self.cancel.clone(),
                self.events.clone(),
            ));
        }
    }
}

async fn item_task(
    album_id: String,
    item: Item,
    fetcher: Arc<AssetFetcher>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    events: mpsc::Sender<PipelineEvent>,
) {
    let cancelled = || DownloadOutcome::new(&album_id, &item, ItemStatus::Cancelled, 0);

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => cancelled(),
        outcome = async {
            match semaphore.acquire().await {
                Ok(_permit) => fetcher.fetch_item(&album_id, &item).await,
                Err(_) => cancelled(),
            }
        } => outcome,
    };

    if events.send(PipelineEvent::ItemFinished(outcome)).await.is_err() {
        tracing::debug!("Event receiver gone, dropping outcome of item {}", item.id);
    }
}
