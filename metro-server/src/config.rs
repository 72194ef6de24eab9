//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::{SearchConfig, VisitStrategy};
use crate::source::{ConfiguredSource, FileSource, HttpSource, HttpSourceConfig, SourceError};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5001";
const DEFAULT_EDGES_FILE: &str = "edges.json";

/// Error reading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to create edge source: {0}")]
    Source(#[from] SourceError),
}

/// Where connection records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgesLocation {
    File(PathBuf),
    Url {
        url: String,
        api_key: Option<String>,
    },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub edges: EdgesLocation,

    /// Periodic reload interval; `None` disables periodic reloads.
    pub reload_interval: Option<Duration>,

    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from `METRO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "METRO_BIND_ADDR",
            get("METRO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        // A URL takes precedence over a file.
        let edges = match get("METRO_EDGES_URL") {
            Some(url) => EdgesLocation::Url {
                url,
                api_key: get("METRO_EDGES_API_KEY"),
            },
            None => EdgesLocation::File(PathBuf::from(
                get("METRO_EDGES_FILE").unwrap_or_else(|| DEFAULT_EDGES_FILE.to_string()),
            )),
        };

        let reload_interval = match get("METRO_RELOAD_INTERVAL_SECS") {
            Some(value) => {
                let secs: u64 = parse("METRO_RELOAD_INTERVAL_SECS", value)?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let mut search = SearchConfig::default();
        if let Some(value) = get("METRO_TRANSFER_PENALTY_MINS") {
            search.transfer_penalty_mins = parse("METRO_TRANSFER_PENALTY_MINS", value)?;
        }
        if let Some(value) = get("METRO_LINE_AWARE")
            && parse_flag("METRO_LINE_AWARE", value)?
        {
            search.strategy = VisitStrategy::ByStationAndLine;
        }

        Ok(Self {
            bind_addr,
            edges,
            reload_interval,
            search,
        })
    }

    /// Build the edge source this configuration describes.
    pub fn source(&self) -> Result<ConfiguredSource, ConfigError> {
        Ok(match &self.edges {
            EdgesLocation::File(path) => ConfiguredSource::File(FileSource::new(path)),
            EdgesLocation::Url { url, api_key } => {
                let mut config = HttpSourceConfig::new(url);
                if let Some(key) = api_key {
                    config = config.with_api_key(key);
                }
                ConfiguredSource::Http(HttpSource::new(config)?)
            }
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}
