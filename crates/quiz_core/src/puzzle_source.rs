use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use shared::{domain::PuzzleDescriptor, error::PuzzleSourceError, protocol::decode_puzzle};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://marcconrad.com/uob/banana/api.php";
const CACHE_BUST_PARAM: &str = "t";

#[async_trait]
pub trait PuzzleSource: Send + Sync {
    async fn fetch_puzzle(&self) -> Result<PuzzleDescriptor, PuzzleSourceError>;
}

pub struct HttpPuzzleSource {
    http: Client,
    api_url: Url,
    last_token: AtomicI64,
}

impl HttpPuzzleSource {
    /// `request_timeout` of `None` leaves requests unbounded.
    pub fn new(api_url: Url, request_timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_url,
            last_token: AtomicI64::new(0),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Millisecond timestamp, bumped when two calls land in the same millisecond.
    pub(crate) fn next_cache_bust_token(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut current = self.last_token.load(Ordering::Relaxed);
        loop {
            let next = now.max(current + 1);
            match self.last_token.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    pub(crate) fn request_url(&self, token: i64) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair(CACHE_BUST_PARAM, &token.to_string());
        url
    }
}

#[async_trait]
impl PuzzleSource for HttpPuzzleSource {
    async fn fetch_puzzle(&self) -> Result<PuzzleDescriptor, PuzzleSourceError> {
        let url = self.request_url(self.next_cache_bust_token());
        let started = Instant::now();
        debug!(url = %url, "puzzle source: fetching question");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| PuzzleSourceError::network(err.to_string()))?;

        let status = response.status();
        info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "puzzle source: response received"
        );
        if !status.is_success() {
            return Err(PuzzleSourceError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| PuzzleSourceError::network(err.to_string()))?;
        let puzzle = decode_puzzle(&body)?;
        debug!(image = %puzzle.image_reference, "puzzle source: question decoded");
        Ok(puzzle)
    }
}

#[cfg(test)]
#[path = "tests/puzzle_source_tests.rs"]
mod tests;
