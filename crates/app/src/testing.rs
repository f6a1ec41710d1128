//! In-memory fakes shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use eigerdash_domain::error::DashError;
use serde_json::{Value, json};

use crate::ports::{Notifier, StatusApi};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Canned responses keyed by path. Unknown GETs fail with a transport
/// error; unknown PUTs succeed with `{}`.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<String, Result<Value, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn respond(&self, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(body));
    }

    pub fn reject(&self, path: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path == path)
            .count()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Option<Result<Value, String>> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        self.responses.lock().unwrap().get(path).cloned()
    }
}

impl StatusApi for FakeApi {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        let result = match self.record("GET", path, None) {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(DashError::Rejected(message)),
            None => Err(DashError::Transport("connection refused".into())),
        };
        async move { result }
    }

    fn put(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, DashError>> + Send + use<> {
        let result = match self.record("PUT", path, body) {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(DashError::Rejected(message)),
            None => Ok(json!({})),
        };
        async move { result }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn detector_config(count_time: f64) -> Value {
    json!({
        "count_time": {"value": count_time},
        "frame_time": {"value": 1.0},
        "nimages": {"value": 10},
    })
}
