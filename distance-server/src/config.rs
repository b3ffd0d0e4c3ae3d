//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::DEFAULT_WARM_UP_CONCURRENCY;
use crate::geocode::GeocodeConfig;
use crate::routing::RoutingConfig;

/// Default cap on request bodies (the uploaded spreadsheet): 10 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DESTINATIONS_PATH: &str = "data/destinations.json";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error for an environment variable with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?} ({reason})")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// JSON file listing destinations
    pub destinations_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    pub geocode: GeocodeConfig,
    pub routing: RoutingConfig,
    /// Geocode every destination before accepting requests
    pub warm_up: bool,
    /// Geocoding requests in flight during warm-up
    pub warm_up_concurrency: usize,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a key lookup (for testing).
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(get("BIND_ADDR"), "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let timeout_secs = parse_or(
            get("HTTP_TIMEOUT_SECS"),
            "HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )?;
        let warm_up = parse_bool(get("WARM_UP"), "WARM_UP", true)?;
        let warm_up_concurrency = parse_or(
            get("WARM_UP_CONCURRENCY"),
            "WARM_UP_CONCURRENCY",
            &DEFAULT_WARM_UP_CONCURRENCY.to_string(),
        )?;
        let max_upload_bytes = parse_or(
            get("MAX_UPLOAD_BYTES"),
            "MAX_UPLOAD_BYTES",
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )?;

        let mut geocode = GeocodeConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("GEOCODE_BASE_URL") {
            geocode = geocode.with_base_url(url);
        }

        let mut routing = RoutingConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("ROUTING_BASE_URL") {
            routing = routing.with_base_url(url);
        }

        Ok(Self {
            bind_addr,
            destinations_path: get("DESTINATIONS_PATH")
                .unwrap_or_else(|| DEFAULT_DESTINATIONS_PATH.to_string())
                .into(),
            static_dir: get("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            geocode,
            routing,
            warm_up,
            warm_up_concurrency,
            max_upload_bytes,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|e| ConfigError {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

fn parse_bool(value: Option<String>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key,
            value: raw,
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.destinations_path, PathBuf::from("data/destinations.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.geocode.base_url, "https://api.postcodes.io");
        assert_eq!(config.geocode.timeout_secs, 10);
        assert_eq!(config.routing.base_url, "https://router.project-osrm.org");
        assert_eq!(config.routing.timeout_secs, 10);
        assert!(config.warm_up);
        assert_eq!(config.warm_up_concurrency, 4);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DESTINATIONS_PATH", "/etc/distance/destinations.json"),
            ("GEOCODE_BASE_URL", "http://localhost:9001"),
            ("ROUTING_BASE_URL", "http://localhost:5000"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("WARM_UP", "off"),
            ("WARM_UP_CONCURRENCY", "8"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.destinations_path,
            PathBuf::from("/etc/distance/destinations.json")
        );
        assert_eq!(config.geocode.base_url, "http://localhost:9001");
        assert_eq!(config.geocode.timeout_secs, 3);
        assert_eq!(config.routing.base_url, "http://localhost:5000");
        assert_eq!(config.routing.timeout_secs, 3);
        assert!(!config.warm_up);
        assert_eq!(config.warm_up_concurrency, 8);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = config_from(&[("BIND_ADDR", ""), ("WARM_UP", "  ")]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert!(config.warm_up);
    }

    #[test]
    fn invalid_number() {
        let err = config_from(&[("HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(err.key, "HTTP_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");
    }

    #[test]
    fn invalid_address() {
        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.key, "BIND_ADDR");
    }

    #[test]
    fn invalid_bool() {
        let err = config_from(&[("WARM_UP", "maybe")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for WARM_UP: \"maybe\" (expected true or false)"
        );
    }
}
