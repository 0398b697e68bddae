//! Server settings loaded via OrthoConfig and the resolved server configuration.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use bloglist::domain::DEFAULT_TOKEN_TTL;
use bloglist::inbound::http::token_config::TokenSettings;
use bloglist::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3003;

/// Listener, storage and token lifetime settings.
///
/// Values come from `BLOGLIST_*` environment variables, configuration files
/// and command-line flags, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Lifetime of issued bearer tokens, in seconds.
    pub token_ttl_secs: Option<u64>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 3003.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Return the token lifetime, falling back to [`DEFAULT_TOKEN_TTL`].
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host = self.host();
        (host, self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("host {host} resolved to no addresses"),
                )
            })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_settings: TokenSettings,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_settings: TokenSettings) -> Self {
        Self {
            bind_addr,
            token_settings,
            token_ttl: DEFAULT_TOKEN_TTL,
            db_pool: None,
        }
    }

    /// Override the lifetime of issued tokens.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the Diesel repositories instead of the
    /// in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Read by the bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
