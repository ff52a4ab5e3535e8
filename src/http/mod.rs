//! HTTP client layer: `BitGoHttp` request/response pipeline and caller-side backoff.

pub mod client;
pub mod retry;

pub use client::{ApiRequest, BitGoHttp};
pub use retry::RetryConfig;
