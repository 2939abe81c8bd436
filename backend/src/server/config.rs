//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use user_registry::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) minimum_age: u32,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Construct a server configuration using the wall clock.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, minimum_age: u32) -> Self {
        Self {
            bind_addr,
            minimum_age,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Derive the configuration from loaded application settings.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the configured host is not an IP
    /// address literal.
    pub fn from_settings(settings: &AppSettings) -> std::io::Result<Self> {
        let bind_addr = settings.bind_addr().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen host {:?}: {err}", settings.host()),
            )
        })?;
        Ok(Self::new(bind_addr, settings.minimum_age))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
