//! reqwest-backed implementation of the `StatusApi` port.

use std::future::Future;
use std::time::Duration;

use eigerdash_app::ports::StatusApi;
use eigerdash_domain::error::DashError;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::error::HttpClientError;

/// Connection settings for the control server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8888`.
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build a [`ReqwestStatusApi`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Build`] if the underlying client cannot
    /// be constructed (e.g. the TLS backend fails to initialise).
    pub fn build(self) -> Result<ReqwestStatusApi, HttpClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(HttpClientError::Build)?;
        Ok(ReqwestStatusApi {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

/// Error body sent by the control server alongside non-success statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON client for the detector control server.
#[derive(Debug, Clone)]
pub struct ReqwestStatusApi {
    base_url: String,
    http: Client,
}

impl ReqwestStatusApi {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn send(
    builder: RequestBuilder,
    url: String,
) -> impl Future<Output = Result<Value, DashError>> + Send {
    let pending = builder.header(ACCEPT, "application/json").send();
    async move {
        let response = pending
            .await
            .map_err(|source| HttpClientError::Request { url, source })?;
        Ok(decode(response).await?)
    }
}

async fn decode(response: Response) -> Result<Value, HttpClientError> {
    let status = response.status();
    let url = response.url().to_string();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| HttpClientError::Request { url, source })?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map_or_else(|_| format!("HTTP {}", status.as_u16()), |body| body.error);
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        return Err(HttpClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

impl StatusApi for ReqwestStatusApi {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        let url = self.url(path);
        send(self.http.get(&url), url)
    }

    fn put(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        let url = self.url(path);
        let builder = self.http.put(&url);
        let builder = match &body {
            Some(body) => builder.json(body),
            None => builder,
        };
        send(builder, url)
    }
}
