//! Shared application state for axum handlers.

use std::sync::Arc;

use eigerdash_app::alerts::AlertQueue;
use eigerdash_app::dashboard::Dashboard;
use eigerdash_app::ports::StatusApi;
use eigerdash_app::services::command_dispatcher::CommandDispatcher;
use eigerdash_app::services::navigator::Navigator;
use eigerdash_app::services::status_service::StatusService;

/// Default `<meta http-equiv="refresh">` period of the dashboard page.
pub const DEFAULT_REFRESH_SECS: u32 = 2;

/// Application state shared across all axum handlers.
///
/// Generic over the status API to avoid dynamic dispatch. `Clone` is
/// implemented manually so `A` itself does not need to be `Clone`; only
/// the `Arc` wrappers are cloned.
pub struct AppState<A> {
    /// Page, visible panel and API version.
    pub dashboard: Arc<Dashboard>,
    /// View routing plus the summary refresh.
    pub navigator: Arc<Navigator<A>>,
    /// Detector and file-writer commands.
    pub commands: Arc<CommandDispatcher<A, AlertQueue>>,
    /// Alerts not yet shown on a page.
    pub alerts: Arc<AlertQueue>,
    /// Page auto-reload period in seconds (`0` disables it).
    pub refresh_secs: u32,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            navigator: Arc::clone(&self.navigator),
            commands: Arc::clone(&self.commands),
            alerts: Arc::clone(&self.alerts),
            refresh_secs: self.refresh_secs,
        }
    }
}

impl<A: StatusApi> AppState<A> {
    /// Wire the dashboard services around one status API.
    pub fn new(api: Arc<A>, dashboard: Arc<Dashboard>, alerts: Arc<AlertQueue>) -> Self {
        let status = StatusService::new(Arc::clone(&api), Arc::clone(&dashboard));
        let commands = CommandDispatcher::new(api, Arc::clone(&alerts), Arc::clone(&dashboard));
        Self {
            dashboard,
            navigator: Arc::new(Navigator::new(status)),
            commands: Arc::new(commands),
            alerts,
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }

    #[must_use]
    pub fn with_refresh_secs(mut self, refresh_secs: u32) -> Self {
        self.refresh_secs = refresh_secs;
        self
    }
}
