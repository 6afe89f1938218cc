//! Server configuration
//!
//! Read once from the environment at startup (after `.env` is loaded) and
//! handed to the stores and the token service by value.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8090";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 3600;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing and empty values are treated alike
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address such as 0.0.0.0:8090")?;

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let token_ttl_secs = match get("TOKEN_TTL_SECS") {
            Some(v) => v.parse().context("TOKEN_TTL_SECS must be an integer")?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        if token_ttl_secs == 0 {
            bail!("TOKEN_TTL_SECS must be greater than zero");
        }

        let token_secret = match get("TOKEN_SECRET") {
            Some(v) => decode_secret(&v)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
                crypto::random_key()
            }
            None => bail!("TOKEN_SECRET must be set in release builds"),
        };

        let auth = AuthConfig {
            token_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections,
            auth,
            frontend_origins,
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = crypto::from_base64(encoded.trim()).context("TOKEN_SECRET must be base64")?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes, got {}", bytes.len())
    })
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("listen_addr", &self.listen_addr)
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("auth", &self.auth)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}
