//! Test doubles for handler tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use eigerdash_app::alerts::AlertQueue;
use eigerdash_app::dashboard::{Dashboard, DashboardSettings};
use eigerdash_app::ports::StatusApi;
use eigerdash_app::update_bus::UpdateBus;
use eigerdash_domain::error::DashError;
use serde_json::{Value, json};

use crate::state::AppState;

/// Answers GETs from a fixed map and records every PUT. PUTs to a path
/// registered with [`StubApi::reject`] fail with the given text.
#[derive(Default)]
pub struct StubApi {
    gets: Mutex<HashMap<String, Value>>,
    rejections: Mutex<HashMap<String, String>>,
    puts: Mutex<Vec<(String, Option<Value>)>>,
}

impl StubApi {
    pub fn respond(&self, path: &str, body: Value) {
        self.gets.lock().unwrap().insert(path.to_string(), body);
    }

    pub fn reject(&self, path: &str, message: &str) {
        self.rejections
            .lock()
            .unwrap()
            .insert(path.to_string(), message.to_string());
    }

    pub fn puts(&self) -> Vec<(String, Option<Value>)> {
        self.puts.lock().unwrap().clone()
    }
}

impl StatusApi for StubApi {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        let result = self
            .gets
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| DashError::Transport("connection refused".into()));
        async move { result }
    }

    fn put(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        self.puts.lock().unwrap().push((path.to_string(), body));
        let result = match self.rejections.lock().unwrap().get(path) {
            Some(message) => Err(DashError::Rejected(message.clone())),
            None => Ok(json!({})),
        };
        async move { result }
    }
}

pub fn test_state() -> (AppState<StubApi>, Arc<StubApi>) {
    let api = Arc::new(StubApi::default());
    let bus = UpdateBus::new(16);
    let dashboard = Arc::new(Dashboard::new(DashboardSettings::default(), bus.clone()));
    let alerts = Arc::new(AlertQueue::new(bus, 16));
    let state = AppState::new(Arc::clone(&api), dashboard, alerts);
    (state, api)
}
