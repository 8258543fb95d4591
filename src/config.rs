use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Subgraph GraphQL endpoint
    pub endpoint: String,
    pub host: String,
    pub port: u16,
    /// Bound on each upstream round trip
    pub upstream_timeout: Duration,
    /// Bound on a whole request, all pages included
    pub request_timeout: Duration,
    pub rust_log: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `UNISWAP_V3_ENDPOINT` (default: hosted Uniswap v3 subgraph)
    /// - `SERVER_HOST` (default: 0.0.0.0)
    /// - `SERVER_PORT` (default: 8080)
    /// - `UPSTREAM_TIMEOUT_SECS` (default: 10)
    /// - `REQUEST_TIMEOUT_SECS` (default: 60)
    /// - `RUST_LOG` (default: info)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("UNISWAP_V3_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "UNISWAP_V3_ENDPOINT must start with http:// or https://".to_string(),
            ));
        }

        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::InvalidValue(format!("SERVER_PORT must be a port number, got '{}'", raw))
            })?,
            None => 8080,
        };

        let upstream_timeout = parse_timeout(&lookup, "UPSTREAM_TIMEOUT_SECS", 10)?;
        let request_timeout = parse_timeout(&lookup, "REQUEST_TIMEOUT_SECS", 60)?;

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            endpoint,
            host,
            port,
            upstream_timeout,
            request_timeout,
            rust_log,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Whole seconds, at least one
fn parse_timeout<F>(lookup: &F, key: &str, default_secs: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be a positive number of seconds, got '{}'",
                    key, raw
                )))
            }
        },
        None => default_secs,
    };
    Ok(Duration::from_secs(secs))
}
