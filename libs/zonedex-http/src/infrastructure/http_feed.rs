//! HTTP Zone Feed Implementation
//!
//! This module implements the `ZoneFeed` port with `reqwest`. It performs the
//! single GET the domain asks for and converts transport errors to domain
//! errors. Status and body are handed back untouched.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::{debug, error, info, info_span, Instrument};
use zonedex_domain::{FeedResponse, ZoneFeed, ZoneIndexError};

use crate::config::FeedConfig;

/// HTTP implementation of the `ZoneFeed` port
///
/// ## Error Handling
///
/// Connection failures, timeouts and body read failures become
/// `ZoneIndexError::Fetch`. Non-success statuses are returned as-is and
/// rejected by the domain.
#[derive(Clone)]
pub struct HttpZoneFeed {
    client: Client,
    config: FeedConfig,
}

impl HttpZoneFeed {
    /// Create a feed with its own client
    ///
    /// # Errors
    ///
    /// Returns `ZoneIndexError::Config` if the HTTP client cannot be built.
    pub fn new(config: FeedConfig) -> Result<Self, ZoneIndexError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ZoneIndexError::config_error(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a feed around an existing client
    ///
    /// The configured timeout is applied per request, so it holds whatever
    /// timeout the client was built with.
    pub fn with_client(client: Client, config: FeedConfig) -> Self {
        info!(endpoint = %config.endpoint, "Initializing HttpZoneFeed");
        Self { client, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!(
                "request to '{}' timed out after {:?}",
                self.config.endpoint, self.config.timeout
            )
        } else {
            format!("request to '{}' failed: {}", self.config.endpoint, err)
        }
    }
}

impl ZoneFeed for HttpZoneFeed {
    fn fetch(&self) -> impl std::future::Future<Output = Result<FeedResponse, ZoneIndexError>> + Send {
        let span = info_span!("zone_feed_fetch", endpoint = %self.config.endpoint);

        async move {
            debug!(user_agent = %self.config.user_agent, "Requesting zone feed");

            let response = self
                .client
                .get(&self.config.endpoint)
                .timeout(self.config.timeout)
                .header(USER_AGENT, &self.config.user_agent)
                .header(ACCEPT, "application/geo+json, application/json")
                .send()
                .await
                .map_err(|err| {
                    error!(error = ?err, "Zone feed request failed");
                    ZoneIndexError::fetch_failure(self.describe(&err))
                })?;

            let status = response.status().as_u16();

            let body = response.bytes().await.map_err(|err| {
                error!(status, error = ?err, "Failed to read zone feed body");
                ZoneIndexError::fetch_failure(self.describe(&err))
            })?;

            info!(status, size = body.len(), "Zone feed retrieved");

            Ok(FeedResponse { status, body })
        }
        .instrument(span)
    }
}
