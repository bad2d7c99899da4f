//! # zonedex HTTP adapter
//!
//! Implements the domain's `ZoneFeed` port over HTTP and owns the feed
//! configuration (endpoint, client identifier, timeout).

pub mod config;
pub mod infrastructure;

pub use config::FeedConfig;
pub use infrastructure::HttpZoneFeed;
