//! In-process alert queue: the [`Notifier`] used by the dashboard surface.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::ports::Notifier;
use crate::update_bus::{DashboardUpdate, UpdateBus};

/// Collects alerts until the page shows them.
///
/// Each alert is also logged and broadcast on the [`UpdateBus`] so live
/// subscribers see it immediately.
#[derive(Debug)]
pub struct AlertQueue {
    pending: Mutex<VecDeque<String>>,
    bus: UpdateBus,
    capacity: usize,
}

impl AlertQueue {
    /// Create a queue that keeps at most `capacity` unseen alerts, dropping
    /// the oldest first.
    #[must_use]
    pub fn new(bus: UpdateBus, capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            bus,
            capacity: capacity.max(1),
        }
    }

    /// Take every pending alert, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for AlertQueue {
    fn alert(&self, message: &str) {
        tracing::warn!(message, "alert");
        {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            if pending.len() == self.capacity {
                pending.pop_front();
            }
            pending.push_back(message.to_string());
        }
        self.bus.publish(DashboardUpdate::Alert {
            message: message.to_string(),
        });
    }
}
