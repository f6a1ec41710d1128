//! In-process update bus backed by a tokio broadcast channel.

use eigerdash_domain::endpoint::StatusTarget;
use eigerdash_domain::view::Panel;
use serde::Serialize;
use tokio::sync::broadcast;

/// Something on the dashboard changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardUpdate {
    /// A status response was applied to the page.
    Rendered { target: StatusTarget, seq: u64 },
    /// The visible panel changed (or was re-entered).
    Navigated { panel: Panel, title: String },
    /// A command failed and the user was alerted.
    Alert { message: String },
}

/// In-process update bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the update is simply dropped). Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct UpdateBus {
    sender: broadcast::Sender<DashboardUpdate>,
}

impl UpdateBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to updates published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.sender.subscribe()
    }

    pub fn publish(&self, update: DashboardUpdate) {
        // send fails only when there are zero receivers
        let _ = self.sender.send(update);
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_update_to_subscriber() {
        let bus = UpdateBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DashboardUpdate::Rendered {
            target: StatusTarget::Receivers,
            seq: 3,
        });

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received,
            DashboardUpdate::Rendered {
                target: StatusTarget::Receivers,
                seq: 3
            }
        );
    }

    #[tokio::test]
    async fn should_deliver_update_to_clone_subscribers() {
        let bus = UpdateBus::new(16);
        let clone = bus.clone();
        let mut rx = clone.subscribe();

        bus.publish(DashboardUpdate::Alert {
            message: "FAILED: nope".to_string(),
        });

        assert!(matches!(rx.recv().await.unwrap(), DashboardUpdate::Alert { .. }));
    }

    #[test]
    fn should_succeed_when_no_subscribers() {
        let bus = UpdateBus::new(16);
        bus.publish(DashboardUpdate::Navigated {
            panel: Panel::Home,
            title: "Eiger".to_string(),
        });
    }

    #[test]
    fn should_serialize_with_type_tag() {
        let json = serde_json::to_value(DashboardUpdate::Navigated {
            panel: Panel::Receivers,
            title: "Eiger (fr-view)".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "navigated", "panel": "fr-view", "title": "Eiger (fr-view)"})
        );
    }
}
