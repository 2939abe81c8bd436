//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_REGISTRY_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_MINIMUM_AGE;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the user registry service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct AppSettings {
    /// Minimum age, in calendar years, required to register.
    #[ortho_config(default = 18)]
    pub minimum_age: u32,
    /// Interface address to bind the HTTP listener on.
    pub host: Option<String>,
    /// TCP port for the HTTP listener.
    pub port: Option<u16>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
            host: None,
            port: None,
        }
    }
}

impl AppSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the host is not an IP address literal.
    ///
    /// # Examples
    /// ```
    /// use user_registry::settings::AppSettings;
    ///
    /// let settings = AppSettings::default();
    /// let addr = settings.bind_addr().expect("default host is an IP literal");
    /// assert_eq!(addr.to_string(), "0.0.0.0:8080");
    /// ```
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host().parse()?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}
