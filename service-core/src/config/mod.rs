use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::net::lookup_host;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load the bind address from `.env`, an optional `configuration` file and
    /// plain `HOST` / `PORT` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::default()
                    .try_parsing(true)
                    .ignore_empty(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Resolve `host:port` to the first address it names. `HOST` may be an IP
    /// literal or a hostname such as `localhost`.
    pub async fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let mut addrs = lookup_host((self.host.as_str(), self.port)).await.map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid HOST '{}': {}", self.host, e))
        })?;
        addrs.next().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("Cannot resolve HOST '{}'", self.host))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_binds_all_interfaces() {
        let addr = Config::default().socket_addr().await.unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8000");
    }

    #[tokio::test]
    async fn resolves_localhost() {
        let config = Config {
            host: "localhost".to_string(),
            port: 0,
        };
        let addr = config.socket_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 0);
    }

    #[tokio::test]
    async fn rejects_malformed_host() {
        let config = Config {
            host: "bad host name!".to_string(),
            port: 8000,
        };
        assert!(matches!(
            config.socket_addr().await,
            Err(AppError::ConfigError(_))
        ));
    }
}
