//! Navigator: view routing plus the summary refresh on entering home.

use eigerdash_domain::endpoint::StatusTarget;
use eigerdash_domain::view::Transition;

use super::status_service::StatusService;
use crate::ports::StatusApi;

/// Targets re-fetched whenever the home panel is entered.
pub const SUMMARY_TARGETS: [StatusTarget; 2] = [StatusTarget::ApiVersion, StatusTarget::Adapters];

pub struct Navigator<A> {
    status: StatusService<A>,
}

impl<A: StatusApi> Navigator<A> {
    pub fn new(status: StatusService<A>) -> Self {
        Self { status }
    }

    /// Show the panel selected by `fragment`. Entering the home panel
    /// (including re-entering it) refreshes the server summary; no other
    /// panel triggers fetches.
    pub async fn navigate(&self, fragment: &str) -> Transition {
        let transition = self.status.dashboard().navigate(fragment);
        if transition.refreshes_summary() {
            let [version, adapters] =
                SUMMARY_TARGETS.map(|target| self.status.refresh_task(target));
            tokio::join!(version, adapters);
        }
        transition
    }
}
