//! # BitGo v2 client
//!
//! A typed Rust client for the BitGo v2 wallet REST API (or a BitGo Express
//! instance in front of it).
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Error taxonomy, diagnostic sink, configuration, shared types
//! 2. **HTTP**: `BitGoHttp` builds requests, executes them and classifies failures
//! 3. **Domain**: Wire types and sub-clients per resource (`wallet`)
//! 4. **High-Level Client**: `BitGoClient` with a builder and sub-client accessors
//!
//! The client never retries and never swallows an error. Non-200 responses
//! come back as [`error::ApiError`] values carrying an [`error::ErrorKind`] for the
//! caller to act on.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bitgo::prelude::*;
//!
//! let client = BitGoClient::builder()
//!     .base_url("http://0.0.0.0:3080")
//!     .coin("tbtc")
//!     .access_token("v2x...")
//!     .build()?;
//!
//! let ctx = CancellationToken::new();
//! let mut query = QueryParams::new();
//! client
//!     .wallets()
//!     .unspents(&ctx, "wallet_id", &mut query, |page| {
//!         println!("{} unspents", page.unspents.len());
//!     })
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types and status classification.
pub mod error;

/// Diagnostic sink for request/response events.
pub mod logging;

/// Immutable transport configuration.
pub mod config;

/// Network URL constants.
pub mod network;

/// Query parameters and unit conversion.
pub mod shared;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Request/response pipeline and caller-side backoff.
pub mod http;

// ── Layer 3: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): wire types and sub-clients.
pub mod domain;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `BitGoClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Client + sub-clients
    pub use crate::client::{BitGoClient, BitGoClientBuilder, WalletsClient};
    pub use crate::config::Config;

    // HTTP layer
    pub use crate::http::{ApiRequest, BitGoHttp, RetryConfig};

    // Errors
    pub use crate::error::{classify, ApiError, ErrorKind, SdkError, TransportError};

    // Logging
    pub use crate::logging::{Logger, NoopLogger, TracingLogger};

    // Domain types (wallet)
    pub use crate::domain::wallet::{
        ConsolidateParams, ListMeta, TxInfo, Unspent, UnspentList, UnspentsFilter,
    };

    // Shared
    pub use crate::shared::{to_bitcoins, to_satoshis, QueryParams};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_COIN, LOCAL_EXPRESS_URL, TEST_API_URL};

    // Ambient context
    pub use tokio_util::sync::CancellationToken;
}
