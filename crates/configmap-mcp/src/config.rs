use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub kube: KubeConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubeConfig {
    /// Overrides the namespace inferred from kubeconfig or the in-cluster service account.
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub filter: String,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            server: ServerConfig {
                addr: lookup("SERVER_ADDR").unwrap_or(defaults.server.addr),
            },
            kube: KubeConfig {
                namespace: lookup("KUBE_NAMESPACE").filter(|ns| !ns.trim().is_empty()),
            },
            log: LogConfig {
                filter: lookup("RUST_LOG").unwrap_or(defaults.log.filter),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        self.server.addr.parse().map_err(|e| {
            crate::Error::Config(format!(
                "SERVER_ADDR '{}' is not a valid socket address: {}",
                self.server.addr, e
            ))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: DEFAULT_ADDR.to_string(),
            },
            kube: KubeConfig { namespace: None },
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
            },
        }
    }
}
