//! Zone index service - fetch, normalize, cache
//!
//! The service owns one feed and one cache gate. It is built by whatever
//! bootstraps the application and shared from there; nothing in the domain
//! keeps a process-wide instance.

use std::sync::Arc;

use tracing::{info, warn};

use super::gate::{CacheGate, GateStatus};
use super::{payload, Result, ZoneIndex, ZoneIndexError};
use crate::ports::ZoneFeed;

/// Service producing the zone index
///
/// ## Static Dispatch
///
/// The service is generic over any `ZoneFeed` implementation, so tests use
/// an in-memory feed and production uses the HTTP adapter with no trait
/// objects involved.
pub struct ZoneIndexService<F> {
    feed: F,
    gate: CacheGate<ZoneIndex>,
}

impl<F> ZoneIndexService<F>
where
    F: ZoneFeed,
{
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            gate: CacheGate::new(),
        }
    }

    /// Fetch the feed and build a fresh index, bypassing the cache
    ///
    /// # Errors
    ///
    /// - `ZoneIndexError::Fetch` if the feed could not be retrieved, answered
    ///   with a non-success status, or returned a body that is not JSON
    /// - `ZoneIndexError::SourceData` if the body does not have the expected shape
    pub async fn build_index(&self) -> Result<ZoneIndex> {
        let response = self.feed.fetch().await?;

        if !response.is_success() {
            return Err(ZoneIndexError::fetch_failure(format!(
                "zone feed returned status {}",
                response.status
            )));
        }

        let records = payload::parse_features(&response.body)?;
        let index = ZoneIndex::from_records(records);

        let stats = index.stats();
        info!(
            zones = stats.zones,
            identifiers = stats.identifiers,
            categories = stats.categories,
            "Zone index built"
        );

        Ok(index)
    }

    /// Return the process-lifetime index, building it on first use
    ///
    /// Concurrent first calls share a single fetch. A failed build is reported
    /// to every caller waiting on it and leaves nothing cached, so a later call
    /// fetches again.
    pub async fn get_zone_index(&self) -> Result<Arc<ZoneIndex>> {
        self.gate
            .get_or_build(|| async {
                info!("Loading zone index");
                self.build_index().await.inspect_err(|err| {
                    warn!(error = %err, "Zone index build failed");
                })
            })
            .await
    }

    /// The cached index, without triggering a build
    pub fn cached(&self) -> Option<Arc<ZoneIndex>> {
        self.gate.get()
    }

    pub fn status(&self) -> GateStatus {
        self.gate.status()
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FeedResponse;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // Scripted feed for testing: replays queued responses, counts calls
    struct ScriptedFeed {
        responses: Mutex<VecDeque<Result<FeedResponse>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFeed {
        fn new(responses: Vec<Result<FeedResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ZoneFeed for ScriptedFeed {
        fn fetch(&self) -> impl std::future::Future<Output = Result<FeedResponse>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ZoneIndexError::fetch_failure("script exhausted")));

            async move { next }
        }
    }

    const BODY: &str = r#"{ "features": [
        { "properties": { "id": "A1", "name": "Coastal", "state": "CA" } },
        { "properties": { "id": "A2", "name": "Coastal", "state": "CA" } },
        { "properties": { "id": "B1", "name": "Inland", "state": null } }
    ] }"#;

    fn ok_body() -> Result<FeedResponse> {
        Ok(FeedResponse::new(200, BODY))
    }

    #[tokio::test]
    async fn test_build_index_success() {
        let service = ZoneIndexService::new(ScriptedFeed::new(vec![ok_body()]));

        let index = service.build_index().await.unwrap();

        assert_eq!(index.categories(), ["ca", "uncategorized"]);
        assert_eq!(index.by_id().len(), 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let service = ZoneIndexService::new(ScriptedFeed::new(vec![Ok(FeedResponse::new(
            503, BODY,
        ))]));

        let err = service.build_index().await.unwrap_err();

        assert!(err.is_fetch());
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_bad_shape_is_source_data_error() {
        let service = ZoneIndexService::new(ScriptedFeed::new(vec![Ok(FeedResponse::new(
            200,
            r#"{ "zones": [] }"#,
        ))]));

        let err = service.get_zone_index().await.unwrap_err();

        assert!(err.is_source_data());
        assert_eq!(service.status(), GateStatus::Empty);
    }

    #[tokio::test]
    async fn test_get_zone_index_fetches_once() {
        let service = ZoneIndexService::new(ScriptedFeed::new(vec![ok_body(), ok_body()]));

        let first = service.get_zone_index().await.unwrap();
        let second = service.get_zone_index().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.feed().calls(), 1);
        assert_eq!(service.status(), GateStatus::Ready);
        assert!(Arc::ptr_eq(&service.cached().unwrap(), &first));
    }

    #[tokio::test]
    async fn test_retry_after_failed_fetch() {
        let service = ZoneIndexService::new(ScriptedFeed::new(vec![
            Err(ZoneIndexError::fetch_failure("connection refused")),
            ok_body(),
        ]));

        let err = service.get_zone_index().await.unwrap_err();
        assert!(err.is_fetch());
        assert!(service.cached().is_none());

        let index = service.get_zone_index().await.unwrap();
        assert_eq!(index.stats().zones, 2);
        assert_eq!(service.feed().calls(), 2);
    }
}
