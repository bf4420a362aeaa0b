use leptos::get_configuration;
use std::net::SocketAddr;
use thiserror::Error;

pub const DATABASE_ENV: &str = "STOREFRONT_DB";
pub const ASSETS_ENV: &str = "STOREFRONT_ASSETS";
pub const DEFAULT_DATABASE_PATH: &str = "storefront.db";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub site_addr: SocketAddr,
    pub database_path: String,
    pub assets_dir: String,
}

impl ServerConfig {
    /// Listen address comes from the leptos configuration (`site-addr`,
    /// `LEPTOS_SITE_ADDR`), storage paths from `STOREFRONT_*` variables.
    pub async fn load() -> Result<Self, ConfigError> {
        let conf = get_configuration(None)
            .await
            .map_err(|e| ConfigError::Leptos(e.to_string()))?;
        Ok(Self::from_parts(
            conf.leptos_options.site_addr,
            std::env::var(DATABASE_ENV).ok(),
            std::env::var(ASSETS_ENV).ok(),
        ))
    }

    pub fn from_parts(
        site_addr: SocketAddr,
        database_path: Option<String>,
        assets_dir: Option<String>,
    ) -> Self {
        let or_default = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        ServerConfig {
            site_addr,
            database_path: or_default(database_path, DEFAULT_DATABASE_PATH),
            assets_dir: or_default(assets_dir, DEFAULT_ASSETS_DIR),
        }
    }
}
