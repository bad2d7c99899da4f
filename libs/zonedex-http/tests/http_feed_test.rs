//! Integration tests for the HTTP zone feed
//!
//! Each test starts a throwaway axum server on an ephemeral local port and
//! points the feed at it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use zonedex_domain::zones::ZoneIndexService;
use zonedex_domain::ZoneFeed;
use zonedex_http::{FeedConfig, HttpZoneFeed};

const ZONES_BODY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "properties": { "id": "CAZ006", "name": "San Francisco", "state": "CA" } },
        { "properties": { "id": "CAZ506", "name": "San Francisco", "state": "CA" } },
        { "properties": { "id": "PZZ530", "name": "San Pablo Bay", "state": null } }
    ]
}"#;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    delay: Duration,
    user_agents: Arc<Mutex<Vec<String>>>,
}

async fn zones_handler(State(upstream): State<Upstream>, headers: HeaderMap) -> (StatusCode, String) {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    upstream.user_agents.lock().unwrap().push(user_agent);

    tokio::time::sleep(upstream.delay).await;
    (upstream.status, ZONES_BODY.to_string())
}

/// Start an upstream and return its endpoint plus the recorded user agents
async fn spawn_upstream(status: StatusCode, delay: Duration) -> (String, Arc<Mutex<Vec<String>>>) {
    let user_agents = Arc::new(Mutex::new(Vec::new()));
    let state = Upstream {
        status,
        delay,
        user_agents: user_agents.clone(),
    };

    let app = Router::new()
        .route("/zones/", get(zones_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/zones/", addr), user_agents)
}

fn config(endpoint: String) -> FeedConfig {
    FeedConfig {
        endpoint,
        user_agent: "zonedex-tests".to_string(),
        timeout: Duration::from_secs(5),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn test_fetch_sends_client_identifier() {
    init_tracing();
    let (endpoint, user_agents) = spawn_upstream(StatusCode::OK, Duration::ZERO).await;
    let feed = HttpZoneFeed::new(config(endpoint)).unwrap();

    let response = feed.fetch().await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, ZONES_BODY.as_bytes());
    assert_eq!(*user_agents.lock().unwrap(), vec!["zonedex-tests".to_string()]);
}

#[tokio::test]
async fn test_service_over_http_builds_and_caches() {
    init_tracing();
    let (endpoint, user_agents) = spawn_upstream(StatusCode::OK, Duration::ZERO).await;
    let service = ZoneIndexService::new(HttpZoneFeed::new(config(endpoint)).unwrap());

    let first = service.get_zone_index().await.unwrap();
    let second = service.get_zone_index().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.categories(), ["ca", "uncategorized"]);
    assert_eq!(first.zone_by_id("CAZ506").unwrap().ids(), ["CAZ006", "CAZ506"]);
    assert_eq!(user_agents.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_error_status_is_returned_and_rejected_by_service() {
    init_tracing();
    let (endpoint, _) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, Duration::ZERO).await;
    let feed = HttpZoneFeed::new(config(endpoint)).unwrap();

    let response = feed.fetch().await.unwrap();
    assert_eq!(response.status, 503);
    assert!(!response.is_success());

    let service = ZoneIndexService::new(feed);
    let err = service.get_zone_index().await.unwrap_err();
    assert!(err.is_fetch());
    assert!(service.cached().is_none());
}

#[tokio::test]
async fn test_timeout_is_fetch_error() {
    init_tracing();
    let (endpoint, _) = spawn_upstream(StatusCode::OK, Duration::from_secs(3)).await;
    let feed = HttpZoneFeed::new(FeedConfig {
        timeout: Duration::from_millis(200),
        ..config(endpoint)
    })
    .unwrap();

    let err = feed.fetch().await.unwrap_err();

    assert!(err.is_fetch());
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_timeout_applies_to_supplied_client() {
    init_tracing();
    let (endpoint, _) = spawn_upstream(StatusCode::OK, Duration::from_secs(3)).await;
    let feed = HttpZoneFeed::with_client(
        reqwest::Client::new(),
        FeedConfig {
            timeout: Duration::from_millis(200),
            ..config(endpoint)
        },
    );

    let err = feed.fetch().await.unwrap_err();

    assert!(err.is_fetch());
    assert!(err.to_string().contains("timed out after 200ms"));
}

#[tokio::test]
async fn test_connection_refused_is_fetch_error() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let feed = HttpZoneFeed::new(config(format!("http://{}/zones/", addr))).unwrap();
    let err = feed.fetch().await.unwrap_err();

    assert!(err.is_fetch());
}
