//! Status API port: GET and PUT against the detector control server.

use std::future::Future;
use std::sync::Arc;

use eigerdash_domain::error::DashError;
use serde_json::Value;

/// JSON REST access to the detector control server.
///
/// Paths are absolute on the server (`/api/0.1/fr/status/`). The request is
/// built when the method is called and the returned future borrows nothing,
/// so callers can spawn it and move on without awaiting it.
///
/// Errors:
/// - [`DashError::Transport`] when no response arrived,
/// - [`DashError::Rejected`] for non-success responses, carrying the
///   server's `error` text when it sent one.
pub trait StatusApi: Send + Sync + 'static {
    /// `GET path`, decoded as JSON.
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DashError>> + Send + use<Self>;

    /// `PUT path` with `body` serialized as JSON (no payload when `None`).
    fn put(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, DashError>> + Send + use<Self>;
}

impl<T: StatusApi> StatusApi for Arc<T> {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DashError>> + Send + use<T> {
        (**self).get(path)
    }

    fn put(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, DashError>> + Send + use<T> {
        (**self).put(path, body)
    }
}
