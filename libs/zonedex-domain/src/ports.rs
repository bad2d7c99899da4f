//! Ports (trait definitions) for external dependencies
//!
//! The domain only needs one thing from the outside world: the raw bytes and
//! status of a single retrieval of the zone feed. Interpreting the status and
//! the body stays in the domain so every adapter behaves the same way.
//!
//! ## Static Dispatch
//!
//! Like the rest of the workspace, the port uses `impl Future` return types
//! instead of `async_trait`.

use std::future::Future;

use bytes::Bytes;

use crate::zones::ZoneIndexError;

/// Raw outcome of one feed retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Unparsed response body
    pub body: Bytes,
}

impl FeedResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for retrieving the upstream zone feed
///
/// Implementations must:
/// - Send the configured client-identifier header with every request
/// - Return any response that arrived, whatever its status
/// - Convert transport failures (connect, timeout, body read) to
///   `ZoneIndexError::Fetch`
pub trait ZoneFeed: Send + Sync {
    /// Retrieve the feed once
    ///
    /// # Errors
    ///
    /// Returns `ZoneIndexError::Fetch` if no response could be obtained
    fn fetch(&self) -> impl Future<Output = Result<FeedResponse, ZoneIndexError>> + Send;
}
