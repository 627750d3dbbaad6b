use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokenview_query::PaginationConfig;

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_ROUTE_PREFIX: &str = "/ordinals/v1/brc-20";

/// Top-level service configuration, loaded from TOML.
///
/// Every section is optional in the file; missing sections and fields take
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
}

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ServerResult<()> {
        self.pagination
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ServerError::Config(
                "cache.max_entries must be at least 1 when the cache is enabled".into(),
            ));
        }

        let prefix = &self.server.route_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ServerError::Config(format!(
                "server.route_prefix must be empty or start with '/' and not end with '/': {prefix:?}"
            )));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "server.request_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Mount point of the token routes. Empty mounts them at the root.
    pub route_prefix: String,
    pub enable_cors: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            enable_cors: true,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON ledger fixture replayed into the in-memory store at startup.
    pub seed_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServiceConfig::default();
        assert_eq!(c.server.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.server.route_prefix, DEFAULT_ROUTE_PREFIX);
        assert_eq!(c.pagination.default_limit, 20);
        assert_eq!(c.pagination.max_limit, 60);
        assert!(c.cache.enabled);
        assert!(c.store.seed_path.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let c = ServiceConfig::from_toml_str(
            r#"
            [server]
            bind_addr = "0.0.0.0:8080"
            route_prefix = ""

            [pagination]
            max_limit = 100

            [store]
            seed_path = "ledger.json"
            "#,
        )
        .unwrap();
        assert_eq!(c.server.bind_addr.port(), 8080);
        assert!(c.server.route_prefix.is_empty());
        assert!(c.server.enable_cors);
        assert_eq!(c.pagination.default_limit, 20);
        assert_eq!(c.pagination.max_limit, 100);
        assert_eq!(c.store.seed_path, Some(PathBuf::from("ledger.json")));
    }

    #[test]
    fn invalid_limits_rejected() {
        let err = ServiceConfig::from_toml_str("[pagination]\ndefault_limit = 0\n").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        let err = ServiceConfig::from_toml_str("[pagination]\ndefault_limit = 80\n").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn empty_cache_rejected_only_when_enabled() {
        assert!(ServiceConfig::from_toml_str("[cache]\nmax_entries = 0\n").is_err());
        assert!(ServiceConfig::from_toml_str("[cache]\nenabled = false\nmax_entries = 0\n").is_ok());
    }

    #[test]
    fn malformed_prefix_rejected() {
        assert!(ServiceConfig::from_toml_str("[server]\nroute_prefix = \"api/\"\n").is_err());
        assert!(ServiceConfig::from_toml_str("[server]\nroute_prefix = \"/api/\"\n").is_err());
        assert!(ServiceConfig::from_toml_str("[server]\nroute_prefix = \"/api\"\n").is_ok());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenview.toml");
        std::fs::write(&path, "[logging]\njson = true\n").unwrap();
        let c = ServiceConfig::load(&path).unwrap();
        assert!(c.logging.json);
        assert_eq!(c.logging.filter, "info");

        assert!(ServiceConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
