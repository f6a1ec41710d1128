//! Status service: fetch one endpoint, decode it and render it.

use std::future::Future;
use std::sync::Arc;

use eigerdash_domain::endpoint::StatusTarget;
use eigerdash_domain::error::DashError;
use eigerdash_domain::status::StatusResponse;

use crate::dashboard::Dashboard;
use crate::ports::StatusApi;

/// Refreshes status endpoints into the shared [`Dashboard`].
pub struct StatusService<A> {
    api: Arc<A>,
    dashboard: Arc<Dashboard>,
}

impl<A> Clone for StatusService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            dashboard: Arc::clone(&self.dashboard),
        }
    }
}

impl<A: StatusApi> StatusService<A> {
    pub fn new(api: Arc<A>, dashboard: Arc<Dashboard>) -> Self {
        Self { api, dashboard }
    }

    #[must_use]
    pub fn dashboard(&self) -> &Arc<Dashboard> {
        &self.dashboard
    }

    /// Issue `GET` for `target` now and return a future that decodes and
    /// renders the response.
    ///
    /// The request is stamped with a sequence number when issued, so a
    /// response that resolves after a newer one has been rendered is
    /// discarded (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// The future fails with [`DashError::Transport`] or
    /// [`DashError::Rejected`] from the port, or [`DashError::Schema`] when
    /// the body does not match the endpoint's schema. The page is left
    /// untouched in every error case.
    pub fn request(
        &self,
        target: StatusTarget,
    ) -> impl Future<Output = Result<bool, DashError>> + Send + use<A> {
        let seq = self.dashboard.issue(target);
        let path = target.path(&self.dashboard.paths());
        let response = self.api.get(&path);
        let dashboard = Arc::clone(&self.dashboard);
        async move {
            let body = response.await?;
            let decoded = StatusResponse::parse(target, body)?;
            Ok(dashboard.apply(seq, &decoded))
        }
    }

    /// Like [`request`](Self::request), but failures are logged and
    /// swallowed. Resolves to whether the page changed.
    pub fn refresh_task(
        &self,
        target: StatusTarget,
    ) -> impl Future<Output = bool> + Send + use<A> {
        let request = self.request(target);
        async move {
            match request.await {
                Ok(applied) => applied,
                Err(DashError::Schema(err)) => {
                    tracing::warn!(%target, error = %err, "status response rejected");
                    false
                }
                Err(err) => {
                    tracing::debug!(%target, error = %err.user_message(), "status fetch failed");
                    false
                }
            }
        }
    }

    pub async fn refresh(&self, target: StatusTarget) -> bool {
        self.refresh_task(target).await
    }
}
