//! HTTP listener configuration

use anyhow::Result;
use ::config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// Listener settings for a service
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl ServerConfig {
    /// Load listener settings from `<PREFIX>_HOST` and `<PREFIX>_PORT`
    ///
    /// Host defaults to `0.0.0.0`, port to `default_port`.
    pub fn from_env(prefix: &str, default_port: u16) -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", i64::from(default_port))?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
