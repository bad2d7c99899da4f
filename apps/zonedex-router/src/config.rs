//! Router configuration from environment variables

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Runtime settings for the router service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub host: String,
    pub port: u16,
    /// Where to write the serialized index after the startup build
    pub export_path: Option<PathBuf>,
    /// Refuse to start when the startup build fails
    pub require_index: bool,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl RouterConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let host = lookup("ROUTER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("ROUTER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("ROUTER_PORT must be a port number, got '{}'", raw))?,
            None => 3000,
        };

        let require_index = match lookup("ROUTER_REQUIRE_INDEX").as_deref() {
            None | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => bail!("ROUTER_REQUIRE_INDEX must be true or false, got '{}'", other),
        };

        Ok(Self {
            host,
            port,
            export_path: lookup("ZONEDEX_EXPORT_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            require_index,
            json_logs: lookup("ZONEDEX_LOG_FORMAT").is_some_and(|format| format == "json"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
