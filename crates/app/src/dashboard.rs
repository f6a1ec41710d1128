//! Dashboard state: the single owner of everything the page displays.
//!
//! Pollers, the navigator and the HTTP surface all share one [`Dashboard`]
//! behind an `Arc`. Mutations take a short-lived lock and publish a
//! [`DashboardUpdate`] once the lock is released.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use eigerdash_domain::endpoint::{ApiPaths, StatusTarget};
use eigerdash_domain::page::Page;
use eigerdash_domain::render;
use eigerdash_domain::sequence::SequenceGate;
use eigerdash_domain::status::StatusResponse;
use eigerdash_domain::time::{Timestamp, now};
use eigerdash_domain::view::{Panel, Transition, ViewState};
use serde::Serialize;

use crate::update_bus::{DashboardUpdate, UpdateBus};

/// Static settings fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Page title without the panel suffix.
    pub base_title: String,
    /// API version used until `GET /api` answers.
    pub default_api_version: String,
    /// Detector sub-API version (`…/detector/api/{sub}/…`).
    pub detector_api: String,
    /// Minimum number of rows in each unit table.
    pub table_rows: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            base_title: "Eiger".to_string(),
            default_api_version: "0.1".to_string(),
            detector_api: "1.6.0".to_string(),
            table_rows: 4,
        }
    }
}

#[derive(Debug)]
struct DashboardState {
    api_version: String,
    view: ViewState,
    page: Page,
    gates: HashMap<StatusTarget, SequenceGate>,
}

/// Point-in-time copy of the dashboard, as served to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub title: String,
    pub panel: Panel,
    pub api_version: String,
    pub page: Page,
}

impl Snapshot {
    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.page.updated_at()
    }
}

/// Shared dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    settings: DashboardSettings,
    state: Mutex<DashboardState>,
    bus: UpdateBus,
}

impl Dashboard {
    #[must_use]
    pub fn new(settings: DashboardSettings, bus: UpdateBus) -> Self {
        let state = DashboardState {
            api_version: settings.default_api_version.clone(),
            view: ViewState::new(settings.base_title.clone()),
            page: Page::new(),
            gates: HashMap::new(),
        };
        Self {
            settings,
            state: Mutex::new(state),
            bus,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    #[must_use]
    pub fn bus(&self) -> &UpdateBus {
        &self.bus
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// API paths for the currently known API version.
    #[must_use]
    pub fn paths(&self) -> ApiPaths {
        ApiPaths::new(self.api_version(), self.settings.detector_api.clone())
    }

    #[must_use]
    pub fn api_version(&self) -> String {
        self.lock().api_version.clone()
    }

    /// Stamp a new request against `target`.
    pub fn issue(&self, target: StatusTarget) -> u64 {
        self.lock().gates.entry(target).or_default().issue()
    }

    /// Render a decoded response unless a newer one for the same endpoint
    /// was already applied. Returns whether the page changed.
    pub fn apply(&self, seq: u64, response: &StatusResponse) -> bool {
        let target = response.target();
        {
            let mut state = self.lock();
            if !state.gates.entry(target).or_default().admit(seq) {
                tracing::debug!(%target, seq, "discarding stale response");
                return false;
            }
            if let StatusResponse::ApiVersion(info) = response {
                state.api_version.clone_from(&info.api);
            }
            render::apply(&mut state.page, response, self.settings.table_rows);
            state.page.touch(now());
        }
        self.bus.publish(DashboardUpdate::Rendered { target, seq });
        true
    }

    /// Switch the visible panel according to `fragment`.
    pub fn navigate(&self, fragment: &str) -> Transition {
        let (transition, title) = {
            let mut state = self.lock();
            let transition = state.view.navigate(fragment);
            (transition, state.view.title().to_string())
        };
        tracing::debug!(from = %transition.from, to = %transition.to, "navigated");
        self.bus.publish(DashboardUpdate::Navigated {
            panel: transition.to,
            title,
        });
        transition
    }

    #[must_use]
    pub fn visible(&self) -> Panel {
        self.lock().view.visible()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            title: state.view.title().to_string(),
            panel: state.view.visible(),
            api_version: state.api_version.clone(),
            page: state.page.clone(),
        }
    }
}
