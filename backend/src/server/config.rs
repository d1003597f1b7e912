//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use marketplace::inbound::http::token_config::TokenSecret;
use marketplace::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration; listings stay in memory until a
    /// pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret) -> Self {
        Self {
            bind_addr,
            token_secret,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
