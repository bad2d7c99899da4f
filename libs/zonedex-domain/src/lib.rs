//! # zonedex Domain Layer
//!
//! This crate turns the flat zone list published by an external authority into
//! the lookup indices a routing layer needs. It follows hexagonal architecture
//! principles:
//!
//! - **Entities**: `RawZoneRecord`, `Zone`, `ZoneIndex`
//! - **Ports**: Trait definitions for external dependencies (`ZoneFeed`)
//! - **Services**: `ZoneIndexService`, which fetches, normalizes and caches
//!
//! ## Architecture
//!
//! This layer has NO dependency on an HTTP client. Retrieval is expressed as
//! the `ZoneFeed` port and implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use zonedex_domain::ports::ZoneFeed;
//! use zonedex_domain::zones::ZoneIndexService;
//!
//! async fn example<F: ZoneFeed>(service: ZoneIndexService<F>) {
//!     let index = service.get_zone_index().await.unwrap();
//!     println!("Known categories: {:?}", index.categories());
//! }
//! ```

pub mod ports;
pub mod zones;

// Re-export commonly used types
pub use ports::{FeedResponse, ZoneFeed};
pub use zones::{Zone, ZoneIndex, ZoneIndexError, ZoneIndexService};
