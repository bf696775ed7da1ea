//! Client for the departures backend.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use api_types::RefreshPeriodDto;
use railwatch_core::SnapshotParts;
use railwatch_core::transit::{FeedFetcher, Result, TransitError};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::config::RefreshPeriod;

// Relative to the backend base URL, which may carry a path prefix.
pub const STATIONS_PATH: &str = "api/stationDepartures";
pub const RUNS_PATH: &str = "api/train";
pub const ROUTES_PATH: &str = "api/routes";
pub const STOPS_PATH: &str = "api/uniqueStops";
pub const REFRESH_PERIOD_PATH: &str = "api/refreshPeriod";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn network(error: impl std::fmt::Display) -> TransitError {
    TransitError::Network(error.to_string())
}

/// [`FeedFetcher`] over HTTP
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(mut base_url: Url) -> eyre::Result<Self> {
        // `Url::join` replaces the last path segment unless it ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(network)
    }
}

impl FeedFetcher for HttpFetcher {
    fn get<'a>(&'a self, path: &'a str) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.endpoint(path)?;
            let response = self
                .client
                .get(url)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(network)?;
            let bytes = response.bytes().await.map_err(network)?;
            Ok(bytes.to_vec())
        })
    }

    fn post<'a>(&'a self, path: &'a str, body: Vec<u8>) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.endpoint(path)?;
            self.client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(network)?;
            Ok(())
        })
    }
}

pub struct Backend<F> {
    fetcher: F,
}

impl<F: FeedFetcher> Backend<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch all four documents concurrently. Any failure fails the snapshot.
    pub async fn snapshot(&self) -> Result<SnapshotParts> {
        let (stations, runs, routes, stops) = tokio::try_join!(
            self.fetcher.get(STATIONS_PATH),
            self.fetcher.get(RUNS_PATH),
            self.fetcher.get(ROUTES_PATH),
            self.fetcher.get(STOPS_PATH),
        )?;
        debug!(
            bytes = stations.len() + runs.len() + routes.len() + stops.len(),
            "fetched snapshot"
        );

        SnapshotParts::from_json(&stations, &runs, &routes, &stops)
    }

    /// The backend's refresh period, or the default if it can't be read.
    pub async fn refresh_period(&self) -> RefreshPeriod {
        match self.fetch_refresh_period().await {
            Ok(period) => period,
            Err(e) => {
                warn!("refresh period unavailable, using default: {e}");
                RefreshPeriod::default()
            }
        }
    }

    async fn fetch_refresh_period(&self) -> Result<RefreshPeriod> {
        let body = self.fetcher.get(REFRESH_PERIOD_PATH).await?;
        let dto: RefreshPeriodDto = serde_json::from_slice(&body)?;
        let period = RefreshPeriod::clamped(dto.seconds);
        if period.seconds() != dto.seconds {
            warn!(requested = dto.seconds, used = period.seconds(), "refresh period out of range");
        }
        Ok(period)
    }

    pub async fn store_refresh_period(&self, period: RefreshPeriod) -> Result<()> {
        let body = serde_json::to_vec(&RefreshPeriodDto {
            seconds: period.seconds(),
        })?;
        self.fetcher.post(REFRESH_PERIOD_PATH, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeFetcher;

    #[test]
    fn test_endpoints_keep_base_path() {
        for base in ["http://backend.local/transit", "http://backend.local/transit/"] {
            let fetcher = HttpFetcher::new(Url::parse(base).unwrap()).unwrap();
            assert_eq!(
                fetcher.endpoint(RUNS_PATH).unwrap().as_str(),
                "http://backend.local/transit/api/train"
            );
        }

        let root = HttpFetcher::new(Url::parse("http://127.0.0.1:5000").unwrap()).unwrap();
        assert_eq!(
            root.endpoint(REFRESH_PERIOD_PATH).unwrap().as_str(),
            "http://127.0.0.1:5000/api/refreshPeriod"
        );
    }

    #[tokio::test]
    async fn test_snapshot_fetches_all_documents() {
        let backend = Backend::new(FakeFetcher::with_sample_feed());
        let parts = backend.snapshot().await.unwrap();

        assert_eq!(parts.stations.len(), 1);
        assert_eq!(parts.runs.len(), 2);
        assert_eq!(parts.routes.len(), 1);
        assert_eq!(parts.stops.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_fails_when_any_document_fails() {
        let fetcher = FakeFetcher::with_sample_feed();
        fetcher.fail(ROUTES_PATH);
        let backend = Backend::new(fetcher);

        assert!(matches!(backend.snapshot().await, Err(TransitError::Network(_))));
    }

    #[tokio::test]
    async fn test_refresh_period_negotiation() {
        let fetcher = FakeFetcher::with_sample_feed();
        fetcher.respond(REFRESH_PERIOD_PATH, r#"{"seconds": 45}"#);
        let backend = Backend::new(fetcher);
        assert_eq!(backend.refresh_period().await.seconds(), 45);

        backend.fetcher.respond(REFRESH_PERIOD_PATH, r#"{"seconds": 2}"#);
        assert_eq!(backend.refresh_period().await.seconds(), 15);

        backend.fetcher.fail(REFRESH_PERIOD_PATH);
        assert_eq!(backend.refresh_period().await, RefreshPeriod::default());
    }

    #[tokio::test]
    async fn test_store_refresh_period_posts_seconds() {
        let backend = Backend::new(FakeFetcher::with_sample_feed());
        backend
            .store_refresh_period(RefreshPeriod::new(120).unwrap())
            .await
            .unwrap();

        let posts = backend.fetcher.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, REFRESH_PERIOD_PATH);
        assert_eq!(posts[0].1, serde_json::json!({"seconds": 120}));
    }
}
