//! Command dispatcher: issue the PUTs of a command and alert on failure.

use std::sync::Arc;

use eigerdash_domain::command::Command;
use eigerdash_domain::error::{DashError, ValidationError};
use tokio::task::JoinHandle;

use crate::dashboard::Dashboard;
use crate::ports::{Notifier, StatusApi};

/// Text of the alert raised for a failed command.
#[must_use]
pub fn failure_message(err: &DashError) -> String {
    format!("FAILED: {}", err.user_message())
}

/// Turns [`Command`]s into PUT requests against the control server.
pub struct CommandDispatcher<A, N> {
    api: Arc<A>,
    notifier: Arc<N>,
    dashboard: Arc<Dashboard>,
}

impl<A, N> Clone for CommandDispatcher<A, N> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
            dashboard: Arc::clone(&self.dashboard),
        }
    }
}

impl<A: StatusApi, N: Notifier> CommandDispatcher<A, N> {
    pub fn new(api: Arc<A>, notifier: Arc<N>, dashboard: Arc<Dashboard>) -> Self {
        Self {
            api,
            notifier,
            dashboard,
        }
    }

    /// Issue every PUT of `command`, in order, without waiting for any of
    /// them. Each failure raises its own alert; nothing is retried or rolled
    /// back.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, command: &Command) -> Dispatch {
        let requests = command.requests(&self.dashboard.paths());
        tracing::info!(command = command.name(), puts = requests.len(), "dispatching");
        let handles = requests
            .into_iter()
            .map(|request| {
                let response = self.api.put(&request.path, request.body);
                let notifier = Arc::clone(&self.notifier);
                let path = request.path;
                tokio::spawn(async move {
                    match response.await {
                        Ok(_) => true,
                        Err(err) => {
                            tracing::warn!(%path, error = %err.user_message(), "command failed");
                            notifier.alert(&failure_message(&err));
                            false
                        }
                    }
                })
            })
            .collect();
        Dispatch { handles }
    }

    /// Dispatch parsed user input, or alert when it did not parse.
    pub fn dispatch_input(&self, input: Result<Command, ValidationError>) -> Option<Dispatch> {
        match input {
            Ok(command) => Some(self.dispatch(&command)),
            Err(err) => {
                self.notifier.alert(&failure_message(&err.into()));
                None
            }
        }
    }
}

/// The PUTs of one dispatched command, each running on its own task.
#[derive(Debug)]
pub struct Dispatch {
    handles: Vec<JoinHandle<bool>>,
}

impl Dispatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every PUT and return how many failed.
    pub async fn settled(self) -> usize {
        let mut failures = 0;
        for handle in self.handles {
            if !matches!(handle.await, Ok(true)) {
                failures += 1;
            }
        }
        failures
    }
}
