//! One polling cycle: fetch, decode, compute, publish.

use std::sync::Arc;

use chrono::Utc;
use railwatch_core::transit::{FeedFetcher, Result};
use railwatch_core::{CursorLedger, EngineOptions, MapFrame, Snapshot};
use tokio::sync::RwLock;
use tracing::info;

use crate::backend::Backend;

/// Output of the last completed cycle. The frame and the cursor ledger
/// recorded with it are always replaced together.
#[derive(Default)]
pub(crate) struct Published {
    pub frame: Option<Arc<MapFrame>>,
    pub ledger: CursorLedger,
}

/// State shared between the refresh loop and the HTTP API.
pub struct MapState {
    pub options: EngineOptions,
    pub(crate) published: RwLock<Published>,
}

impl MapState {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            published: RwLock::new(Published::default()),
        }
    }

    /// The most recent frame, if any cycle has completed.
    pub async fn frame(&self) -> Option<Arc<MapFrame>> {
        self.published.read().await.frame.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleSummary {
    pub vehicles: usize,
    pub stations: usize,
    pub skipped: usize,
}

pub struct RefreshCycle<F> {
    backend: Arc<Backend<F>>,
    state: Arc<MapState>,
}

impl<F: FeedFetcher> RefreshCycle<F> {
    pub fn new(backend: Arc<Backend<F>>, state: Arc<MapState>) -> Self {
        Self { backend, state }
    }

    /// Run one cycle to completion. On failure the previous frame and cursor
    /// ledger stay in place.
    pub async fn run_once(&self) -> Result<CycleSummary> {
        let parts = self.backend.snapshot().await?;

        let ledger = self.state.published.read().await.ledger.clone();
        let snapshot = Snapshot::decode(&parts, &ledger);
        let frame = MapFrame::compute(&snapshot, Utc::now(), &self.state.options);

        let summary = CycleSummary {
            vehicles: frame.vehicles.len(),
            stations: frame.stations.len(),
            skipped: snapshot.skipped,
        };

        let next = Published {
            frame: Some(Arc::new(frame)),
            ledger: ledger.record(&snapshot.runs),
        };
        *self.state.published.write().await = next;

        info!(
            vehicles = summary.vehicles,
            stations = summary.stations,
            skipped = summary.skipped,
            "refreshed map frame"
        );
        Ok(summary)
    }
}
