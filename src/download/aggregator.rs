//! Progress aggregation and completion detection.
//!
//! The aggregator is the single consumer of the pipeline's event channel and
//! the only owner of the progress counters; producers never touch them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::download::events::{DownloadOutcome, PipelineEvent};
use crate::output::{print_album_finished, print_album_started, print_item_processed, print_warning};

/// Counters of one album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumProgress {
    pub title: String,
    pub total_items: usize,
    pub completed_items: usize,
    pub errors: usize,
}

impl AlbumProgress {
    pub fn is_finished(&self) -> bool {
        self.completed_items == self.total_items
    }
}

/// Process-wide counters, mutated only by [`ProgressAggregator`].
#[derive(Debug, Clone, Default)]
pub struct ProgressCounters {
    pub albums: HashMap<String, AlbumProgress>,
    pub total_albums: usize,
    pub albums_completed: usize,
    pub global_errors: usize,
}

impl ProgressCounters {
    pub fn album(&self, album_id: &str) -> Option<&AlbumProgress> {
        self.albums.get(album_id)
    }
}

/// Final line of an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub album_id: String,
    pub title: String,
    pub total_items: usize,
    pub errors: usize,
    pub enumeration_error: Option<String>,
}

/// Result of a whole run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub total_albums: usize,
    pub albums_completed: usize,
    pub items_completed: usize,
    pub global_errors: usize,
    /// Albums in the order they finished.
    pub albums: Vec<AlbumSummary>,
}

impl RunSummary {
    /// Whether every album reached its finished state.
    pub fn is_complete(&self) -> bool {
        self.albums_completed == self.total_albums
    }
}

/// Consumes pipeline events and decides when the run is finished.
pub struct ProgressAggregator {
    counters: ProgressCounters,
    enumeration_errors: HashMap<String, String>,
    finished: Vec<AlbumSummary>,
    started_at: DateTime<Utc>,
    start: Instant,
    run_finished: bool,
    show_progress: bool,
}

impl ProgressAggregator {
    /// Aggregator for a run over `total_albums` albums, starting now.
    pub fn new(total_albums: usize, show_progress: bool) -> Self {
        Self {
            counters: ProgressCounters {
                total_albums,
                ..Default::default()
            },
            enumeration_errors: HashMap::new(),
            finished: Vec::new(),
            started_at: Utc::now(),
            start: Instant::now(),
            run_finished: total_albums == 0,
            show_progress,
        }
    }

    pub fn counters(&self) -> &ProgressCounters {
        &self.counters
    }

    pub fn is_finished(&self) -> bool {
        self.run_finished
    }

    /// Apply one event. Returns `true` once the run is finished.
    pub fn handle(&mut self, event: PipelineEvent) -> bool {
        match event {
            PipelineEvent::AlbumStarted {
                album_id,
                title,
                item_count,
                enumeration_error,
            } => self.on_album_started(album_id, title, item_count, enumeration_error),
            PipelineEvent::ItemFinished(outcome) => self.on_item_finished(outcome),
        }
        self.run_finished
    }

    fn on_album_started(
        &mut self,
        album_id: String,
        title: String,
        item_count: usize,
        enumeration_error: Option<String>,
    ) {
        if self.counters.albums.contains_key(&album_id) {
            tracing::warn!("Album {} started twice, ignoring", album_id);
            return;
        }

        print_album_started(&album_id, &title, item_count);
        if let Some(error) = enumeration_error {
            print_warning(&format!("Could not list items of album {}: {}", album_id, error));
            self.enumeration_errors.insert(album_id.clone(), error);
        }

        self.counters.albums.insert(
            album_id.clone(),
            AlbumProgress {
                title,
                total_items: item_count,
                ..Default::default()
            },
        );

        // Nothing will ever complete an empty album.
        if item_count == 0 {
            self.finish_album(&album_id);
        }
    }

    fn on_item_finished(&mut self, outcome: DownloadOutcome) {
        let Some(album) = self.counters.albums.get_mut(&outcome.album_id) else {
            tracing::warn!(
                "Outcome for item {} of unknown album {}, ignoring",
                outcome.item_id,
                outcome.album_id
            );
            return;
        };

        if album.is_finished() {
            tracing::warn!(
                "Extra outcome for item {} of finished album {}, ignoring",
                outcome.item_id,
                outcome.album_id
            );
            return;
        }

        album.completed_items += 1;
        if !outcome.is_success() {
            album.errors += 1;
            self.counters.global_errors += 1;
        }

        if self.show_progress {
            print_item_processed(&outcome, album.completed_items, album.total_items);
        }

        if album.is_finished() {
            let album_id = outcome.album_id;
            self.finish_album(&album_id);
        }
    }

    /// Album-finished transition; callers only reach it on the completed == total edge.
    fn finish_album(&mut self, album_id: &str) {
        let Some(album) = self.counters.albums.get(album_id) else {
            return;
        };

        print_album_finished(album_id, album.total_items, album.errors);
        self.finished.push(AlbumSummary {
            album_id: album_id.to_string(),
            title: album.title.clone(),
            total_items: album.total_items,
            errors: album.errors,
            enumeration_error: self.enumeration_errors.remove(album_id),
        });
        self.counters.albums_completed += 1;

        if !self.run_finished && self.counters.albums_completed == self.counters.total_albums {
            self.run_finished = true;
        }
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            started_at: self.started_at,
            elapsed: self.start.elapsed(),
            total_albums: self.counters.total_albums,
            albums_completed: self.counters.albums_completed,
            items_completed: self
                .counters
                .albums
                .values()
                .map(|a| a.completed_items)
                .sum(),
            global_errors: self.counters.global_errors,
            albums: self.finished.clone(),
        }
    }

    /// Consume events until every album is finished.
    ///
    /// Returns early, with an incomplete summary, if all producers go away first.
    pub async fn run(mut self, mut events: mpsc::Receiver<PipelineEvent>) -> RunSummary {
        while !self.run_finished {
            match events.recv().await {
                Some(event) => {
                    self.handle(event);
                }
                None => {
                    tracing::warn!(
                        "Event channel closed with {}/{} albums finished",
                        self.counters.albums_completed,
                        self.counters.total_albums
                    );
                    break;
                }
            }
        }

        self.summary()
    }
}
