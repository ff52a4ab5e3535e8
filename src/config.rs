//! Transport configuration shared by every request.

use std::fmt;
use std::sync::Arc;

use crate::logging::Logger;

/// Immutable client configuration. Built by [`BitGoClientBuilder`](crate::client::BitGoClientBuilder).
#[derive(Clone)]
pub struct Config {
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) coin: String,
    /// Bearer credential. NEVER printed by `Debug`.
    pub(crate) access_token: Option<String>,
    pub(crate) logger: Arc<dyn Logger>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Coin (namespace) selector, e.g. `"btc"` or `"tbtc"`.
    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("coin", &self.coin)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
