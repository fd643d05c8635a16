//! Network edge: a paced reqwest client for Scholar pages.
//!
//! Every request first sleeps a randomized delay drawn from the configured
//! bounds; Scholar throttles aggressively otherwise.

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

use crate::common::{FieldValuePair, RecordRef};
use crate::document;
use crate::profile::walker::RecordFetcher;

/// The original sheet's scraper presented a desktop browser; Scholar serves
/// a stripped page to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Seconds to wait between consecutive requests, drawn uniformly.
#[derive(Debug, Clone, Copy)]
pub struct PacingBounds {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl PacingBounds {
    fn draw(&self) -> Duration {
        let secs = if self.max_secs <= self.min_secs {
            self.min_secs
        } else {
            rand::thread_rng().gen_range(self.min_secs..=self.max_secs)
        };
        Duration::from_secs(secs)
    }
}

/// Paced HTTP client handed to the walker and the profile loop.
pub struct DocumentFetcher {
    client: Client,
    pacing: PacingBounds,
}

impl DocumentFetcher {
    pub fn new(pacing: PacingBounds, timeout_secs: u64) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, pacing })
    }

    /// GET a page as text, sleeping the pacing delay first.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let delay = self.pacing.draw();
        debug!("pacing {:?} before {}", delay, url);
        sleep(delay).await;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    /// Follow a moved-profile notice when the page carries one; any failure
    /// falls back to the URL as given.
    pub async fn resolve_updated_url(&self, url: &str) -> String {
        match self.fetch_html(url).await {
            Ok(html) => match document::updated_profile_link(&html) {
                Some(updated) => {
                    debug!("profile moved: {} -> {}", url, updated);
                    updated
                }
                None => url.to_string(),
            },
            Err(e) => {
                warn!("redirect probe failed for {}: {}", url, e);
                url.to_string()
            }
        }
    }
}

#[async_trait]
impl RecordFetcher for DocumentFetcher {
    async fn fetch_record(&self, record: &RecordRef) -> Result<Vec<FieldValuePair>, FetchError> {
        let html = self.fetch_html(&record.url).await?;
        Ok(document::parse_record_fields(&html))
    }
}
