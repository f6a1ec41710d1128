//! Notifier port: user-facing alerts.

use std::sync::Arc;

/// Interrupts the user with a message.
///
/// Only command failures are alerted; polling failures never are.
pub trait Notifier: Send + Sync + 'static {
    fn alert(&self, message: &str);
}

impl<T: Notifier> Notifier for Arc<T> {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}
