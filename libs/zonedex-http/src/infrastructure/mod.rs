//! Infrastructure adapters

mod http_feed;

pub use http_feed::HttpZoneFeed;
