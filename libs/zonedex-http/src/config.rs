//! Feed configuration
//!
//! Read from the environment by the applications (after `dotenvy` has loaded
//! any `.env` file). Unset variables fall back to the public NWS zone feed.

use std::time::Duration;

use zonedex_domain::ZoneIndexError;

/// Default upstream endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.weather.gov/zones/";

/// Default client identifier sent as `User-Agent`
pub const DEFAULT_USER_AGENT: &str = "NWS Alerts Website";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_VAR: &str = "ZONEDEX_ENDPOINT";
pub const USER_AGENT_VAR: &str = "ZONEDEX_USER_AGENT";
pub const TIMEOUT_VAR: &str = "ZONEDEX_TIMEOUT_SECS";

/// Configuration for the HTTP zone feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// URL of the zone collection
    pub endpoint: String,
    /// Client identifier sent with every request
    pub user_agent: String,
    /// Upper bound on a whole retrieval, surfaced as a fetch error
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FeedConfig {
    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self, ZoneIndexError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `ZoneIndexError::Config` if a variable is set but unusable.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ZoneIndexError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint = lookup(ENDPOINT_VAR).unwrap_or(defaults.endpoint);
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ZoneIndexError::config_error(format!(
                "{} must be an http(s) URL, got '{}'",
                ENDPOINT_VAR, endpoint
            )));
        }

        let user_agent = lookup(USER_AGENT_VAR).unwrap_or(defaults.user_agent);
        if user_agent.trim().is_empty() {
            return Err(ZoneIndexError::config_error(format!(
                "{} must not be empty",
                USER_AGENT_VAR
            )));
        }

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ZoneIndexError::config_error(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    )))
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            endpoint,
            user_agent,
            timeout,
        })
    }
}
