//! Shared HTTP plumbing for the blocking gateway implementations.
//!
//! The gateway traits in `kerbside-core` are synchronous. Each provider owns
//! an [`HttpGateway`] that blocks on async `reqwest` calls, reusing the
//! caller's multi-thread runtime when there is one and an owned
//! `current_thread` runtime otherwise. A caller already inside a
//! `current_thread` runtime cannot block it in place, so there the owned
//! runtime is driven from a scoped worker thread.

use std::future::Future;
use std::time::Duration;

use kerbside_core::GatewayError;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::sync::Semaphore;

/// Default user agent for upstream requests.
pub const DEFAULT_USER_AGENT: &str = "kerbside-engine/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default bound on in-flight requests per gateway.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Error type for HTTP gateway construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Client, runtime and request limiter shared by one gateway.
pub(crate) struct HttpGateway {
    client: Client,
    runtime: Runtime,
    permits: Semaphore,
    timeout: Duration,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("available_permits", &self.permits.available_permits())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpGateway {
    /// Build the client and runtime.
    ///
    /// A `max_concurrent_requests` of zero is treated as one.
    pub(crate) fn new(
        user_agent: &str,
        timeout: Duration,
        max_concurrent_requests: usize,
    ) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            permits: Semaphore::new(max_concurrent_requests.max(1)),
            timeout,
        })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a multi-thread runtime the caller's handle is used via
    /// `block_in_place`. Outside any runtime the owned runtime is used
    /// directly. Inside a `current_thread` runtime the owned runtime runs on
    /// a scoped thread while the caller's thread waits; a panic there is
    /// reported against `url` as [`GatewayError::UpstreamUnavailable`].
    pub(crate) fn block_on<T, F>(&self, url: &str, future: F) -> Result<T, GatewayError>
    where
        T: Send,
        F: Future<Output = Result<T, GatewayError>> + Send,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(move || self.runtime.block_on(future))
                    .join()
            })
            .unwrap_or_else(|_| {
                warn!("gateway worker thread panicked while requesting {url}");
                Err(GatewayError::UpstreamUnavailable {
                    url: url.to_owned(),
                    message: "gateway worker thread panicked".to_owned(),
                })
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }

    /// Send `request` and decode a JSON body.
    ///
    /// `url` identifies the request in errors and must not carry credentials.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, GatewayError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|err| GatewayError::UpstreamUnavailable {
                url: url.to_owned(),
                message: err.to_string(),
            })?;

        debug!("GET {url}");
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(err, url))?;

        if !status.is_success() {
            return Err(GatewayError::UpstreamUnavailable {
                url: url.to_owned(),
                message: status_message(status.as_u16(), &body),
            });
        }

        serde_json::from_slice(&body).map_err(|err| GatewayError::UpstreamDecode {
            url: url.to_owned(),
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `GatewayError`.
    ///
    /// The request URL is stripped from the message because it may carry
    /// query-string credentials.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> GatewayError {
        if error.is_timeout() {
            return GatewayError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        let error = error.without_url();
        let message = match std::error::Error::source(&error) {
            Some(source) => format!("{error}: {source}"),
            None => error.to_string(),
        };
        GatewayError::UpstreamUnavailable {
            url: url.to_owned(),
            message,
        }
    }
}

/// Error body shape shared by the upstream APIs, e.g.
/// `{"code": "InvalidInput", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    message: Option<String>,
}

/// Describe a non-success status, folding in the provider's message when
/// the body carries one.
fn status_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorReply>(body)
        .ok()
        .and_then(|reply| reply.message)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("HTTP status {status}"),
            |message| format!("HTTP status {status}: {message}"),
        )
}

/// Join a base URL and a path without doubling the separator.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
