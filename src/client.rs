//! High-level client: `BitGoClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::wallet::client::Wallets;
use crate::error::SdkError;
use crate::http::BitGoHttp;
use crate::logging::{Logger, TracingLogger};
use crate::network::{DEFAULT_API_URL, DEFAULT_COIN};

// Re-export sub-client types for convenience.
pub use crate::domain::wallet::client::Wallets as WalletsClient;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The primary entry point for the BitGo client.
///
/// Safe to share across tasks; it holds no mutable state.
#[derive(Debug, Clone)]
pub struct BitGoClient {
    pub(crate) http: BitGoHttp,
}

impl BitGoClient {
    pub fn builder() -> BitGoClientBuilder {
        BitGoClientBuilder::default()
    }

    /// Client with default settings: production URL, `btc`, no token.
    pub fn new() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn wallets(&self) -> Wallets<'_> {
        Wallets { client: self }
    }

    /// Low-level transport, for endpoints without a sub-client.
    pub fn http(&self) -> &BitGoHttp {
        &self.http
    }

    pub fn config(&self) -> &Config {
        self.http.config()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct BitGoClientBuilder {
    base_url: String,
    coin: String,
    access_token: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl Default for BitGoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            coin: DEFAULT_COIN.to_string(),
            access_token: None,
            http_client: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logger: Arc::new(TracingLogger),
        }
    }
}

impl BitGoClientBuilder {
    /// Builder seeded from `BITGO_BASE_URL`, `BITGO_COIN` and
    /// `BITGO_ACCESS_TOKEN`; unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let mut builder = Self::default();
        if let Some(url) = var("BITGO_BASE_URL") {
            builder = builder.base_url(&url);
        }
        if let Some(coin) = var("BITGO_COIN") {
            builder = builder.coin(&coin);
        }
        if let Some(token) = var("BITGO_ACCESS_TOKEN") {
            builder = builder.access_token(token);
        }
        builder
    }

    /// API domain, usually where a BitGo Express instance runs.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn coin(mut self, coin: &str) -> Self {
        self.coin = coin.to_string();
        self
    }

    /// Bearer token attached to every request. An empty token is treated as none.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    /// Use a preconfigured `reqwest::Client`. `timeout` is then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> Result<BitGoClient, SdkError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SdkError::Validation("base URL cannot be empty".to_string()));
        }
        let coin = self.coin.trim_matches('/').to_string();
        if coin.is_empty() {
            return Err(SdkError::Validation("coin cannot be empty".to_string()));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.timeout)
                .pool_max_idle_per_host(10)
                .build()
                .map_err(|e| SdkError::Validation(format!("Failed to build HTTP client: {}", e)))?,
        };

        Ok(BitGoClient {
            http: BitGoHttp::new(Config {
                http_client,
                base_url,
                coin,
                access_token: self.access_token,
                logger: self.logger,
            }),
        })
    }
}
