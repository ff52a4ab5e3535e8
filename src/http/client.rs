//! Low-level HTTP client: `BitGoHttp`.
//!
//! Two primitives: [`BitGoHttp::new_request`] turns a logical operation into a
//! wire request, [`BitGoHttp::execute`] performs it and turns the response
//! into either a typed value or an [`SdkError`]. One round trip per call, no
//! retries, no caching. Domain sub-clients are thin wrappers over these.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::Level;

use crate::config::Config;
use crate::error::{ApiError, SdkError, TransportError};
use crate::shared::QueryParams;

/// A request ready to be executed, bound to the context it was built under.
#[derive(Debug)]
pub struct ApiRequest {
    inner: reqwest::Request,
    ctx: CancellationToken,
}

impl ApiRequest {
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Encoded JSON body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.inner.body().and_then(|b| b.as_bytes())
    }

    pub fn context(&self) -> &CancellationToken {
        &self.ctx
    }
}

/// Low-level HTTP client for the BitGo v2 REST API.
#[derive(Debug, Clone)]
pub struct BitGoHttp {
    config: Config,
}

impl BitGoHttp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a request for `{base}/api/v2/{coin}/{path}`.
    ///
    /// `path` must not start or end with a slash. A non-empty `query` is
    /// appended in its own iteration order. `body`, if given, is JSON encoded;
    /// encoding failures surface as [`SdkError::Encode`] before any I/O.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<ApiRequest, SdkError> {
        let mut url = format!(
            "{}/api/v2/{}/{}",
            self.config.base_url, self.config.coin, path
        );
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&q.encode());
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| SdkError::Encode(format!("Failed to encode request body: {}", e)))?;

        let logger = self.config.logger();
        let body_text = body.as_deref().map(String::from_utf8_lossy);
        logger.log(
            Level::DEBUG,
            "creating request",
            &[("method", &method), ("url", &url), ("body", &body_text)],
        );

        let parsed = Url::parse(&url)
            .map_err(|e| SdkError::Encode(format!("Invalid request URL '{}': {}", url, e)))?;
        let mut req = reqwest::Request::new(method, parsed);

        let headers = req.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = self.config.access_token.as_deref() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| SdkError::Encode(format!("Invalid access token: {}", e)))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        logger.log(
            Level::DEBUG,
            "request headers are set",
            &[("header", &redacted(req.headers()))],
        );

        if let Some(bytes) = body {
            *req.body_mut() = Some(bytes.into());
        }

        Ok(ApiRequest {
            inner: req,
            ctx: ctx.clone(),
        })
    }

    /// Execute a request and decode a 200 body into `T`.
    ///
    /// The body is buffered before the status is inspected. Any status other
    /// than 200 becomes [`SdkError::Api`] with the raw body preserved.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, SdkError> {
        let ApiRequest { inner, ctx } = request;
        let logger = self.config.logger();

        if ctx.is_cancelled() {
            logger.log(Level::DEBUG, "request cancelled before sending", &[]);
            return Err(TransportError::Cancelled.into());
        }

        logger.log(Level::DEBUG, "sending request", &[]);
        let sent = tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(TransportError::Cancelled),
            resp = self.config.http_client.execute(inner) => resp.map_err(TransportError::from),
        };
        let response = match sent {
            Ok(r) => r,
            Err(e) => {
                logger.log(Level::DEBUG, "request failed", &[("err", &e)]);
                return Err(e.into());
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let read = tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(TransportError::Cancelled),
            bytes = response.bytes() => bytes.map_err(|e| TransportError::Body(e.to_string())),
        };
        let bytes = match read {
            Ok(b) => b,
            Err(e) => {
                logger.log(
                    Level::DEBUG,
                    "invalid body",
                    &[("status", &status), ("err", &e)],
                );
                return Err(e.into());
            }
        };
        let body = String::from_utf8_lossy(&bytes).into_owned();
        logger.log(
            Level::DEBUG,
            "server response",
            &[("status", &status), ("header", &headers), ("body", &body)],
        );

        if status == StatusCode::OK {
            return serde_json::from_slice(&bytes).map_err(|e| SdkError::Decode {
                status: status.as_u16(),
                body,
                message: e.to_string(),
            });
        }

        Err(ApiError::from_response(status.as_u16(), body).into())
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<T, SdkError> {
        let req = self.new_request(ctx, Method::GET, path, query, None::<&()>)?;
        self.execute(req).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, SdkError> {
        let req = self.new_request(ctx, Method::POST, path, None, body)?;
        self.execute(req).await
    }
}

/// Copy of `headers` safe to log.
fn redacted(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer <redacted>"));
    }
    headers
}
