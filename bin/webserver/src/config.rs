//! Centralized webserver configuration.
//!
//! This module provides strongly-typed configuration for the
//! authentication webserver, loaded via the `config` crate from
//! environment variables.
//!
//! See [`OidcConfig`](flightdeck_platform_access::OidcConfig) for the
//! provider connection block and
//! [`WebAuthSettings`](flightdeck_platform_access::WebAuthSettings) for
//! the settings the hosting framework reads.

use flightdeck_platform_access::{OidcConfig, WebAuthSettings};
use serde::Deserialize;

/// Webserver configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// OIDC provider connection configuration.
    pub oidc: OidcConfig,

    /// Authentication settings consumed by the hosting framework.
    #[serde(default)]
    pub auth: WebAuthSettings,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
