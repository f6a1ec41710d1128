//! Response schemas for every consumed status endpoint.
//!
//! Each endpoint body is decoded into an explicit type on receipt. A body
//! that does not fit is reported as a [`SchemaError`] instead of being
//! half-rendered.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::endpoint::StatusTarget;
use crate::error::SchemaError;

/// A parameter exposed by the control server as `{"value": …}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param<T> {
    pub value: T,
}

/// Two-state status flag with lenient decoding.
///
/// `false`, `null`, `0`, `""`, `"0"` and `"false"` are off; anything else
/// is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(pub bool);

impl Flag {
    /// Decode a flag from any JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let on = match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n
                .as_f64()
                .is_some_and(|n| n.classify() != std::num::FpCategory::Zero),
            Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
            Value::Array(_) | Value::Object(_) => true,
        };
        Self(on)
    }

    /// Whether the flag is set.
    #[must_use]
    pub fn is_on(self) -> bool {
        self.0
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

/// Whether a unit's `connected` field means "connected".
///
/// Only boolean `true` and the string `"true"` qualify; servers are not
/// consistent about which of the two they send.
#[must_use]
pub fn is_connected(value: &Value) -> bool {
    matches!(value, Value::Bool(true)) || value.as_str() == Some("true")
}

/// `GET /api`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiInfo {
    /// API version, sent either as a string or as a bare number.
    #[serde(deserialize_with = "version_string")]
    pub api: String,
}

fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a version string or number, got {other}"
        ))),
    }
}

/// `GET /api/{v}/adapters/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdapterList {
    pub adapters: Vec<String>,
}

/// `GET …/detector/api/{sub}/config`: only the fields the dashboard shows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectorConfig {
    /// Exposure time in seconds.
    pub count_time: Param<f64>,
    /// Acquisition period in seconds.
    pub frame_time: Param<f64>,
    /// Number of images per acquisition.
    pub nimages: Param<Number>,
}

/// `GET …/detector/api/{sub}/status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectorStatus {
    pub acquisition_complete: Param<Flag>,
    /// Detector state machine (`idle`, `ready`, `acquire`, …); older
    /// simulators do not report it.
    #[serde(default)]
    pub state: Option<Param<String>>,
}

/// One element of a receiver or processor status list.
///
/// `detail` is decoded only for connected units: disconnected units report
/// little more than their connection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitStatus<D> {
    pub connected: bool,
    pub detail: Option<D>,
}

/// Connected frame receiver status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiverDetail {
    pub status: ReceiverFlags,
    pub buffers: ReceiverBuffers,
    pub frames: ReceiverFrames,
}

/// Configuration progress of a frame receiver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiverFlags {
    pub buffer_manager_configured: Flag,
    pub rx_thread_configured: Flag,
    pub decoder_configured: Flag,
    pub ipc_configured: Flag,
    pub configuration_complete: Flag,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiverBuffers {
    pub empty: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiverFrames {
    pub received: u64,
    pub timedout: u64,
    pub released: u64,
}

/// Connected frame processor status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessorDetail {
    pub shared_memory: SharedMemory,
    pub hdf: HdfStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SharedMemory {
    pub configured: Flag,
}

/// HDF5 writer plugin status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HdfStatus {
    pub processes: u64,
    pub rank: i64,
    pub frames_written: u64,
    pub frames_max: u64,
    #[serde(default)]
    pub file_name: Option<String>,
    pub writing: Flag,
}

#[derive(Deserialize)]
struct UnitList {
    value: Vec<Value>,
}

/// Decode a `{value: [unit, …]}` body, keeping the server's unit order.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the envelope is malformed or a connected
/// unit lacks one of the fields of `D`.
pub fn parse_units<D: DeserializeOwned>(
    endpoint: &'static str,
    body: Value,
) -> Result<Vec<UnitStatus<D>>, SchemaError> {
    let list: UnitList =
        serde_json::from_value(body).map_err(|source| SchemaError { endpoint, source })?;

    list.value
        .into_iter()
        .map(|raw| -> Result<UnitStatus<D>, SchemaError> {
            let connected = raw.get("connected").is_some_and(is_connected);
            let detail = if connected {
                Some(serde_json::from_value(raw).map_err(|source| SchemaError { endpoint, source })?)
            } else {
                None
            };
            Ok(UnitStatus { connected, detail })
        })
        .collect()
}

/// A decoded status response, tagged by the endpoint it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusResponse {
    ApiVersion(ApiInfo),
    Adapters(AdapterList),
    DetectorConfig(DetectorConfig),
    DetectorStatus(DetectorStatus),
    Receivers(Vec<UnitStatus<ReceiverDetail>>),
    Processors(Vec<UnitStatus<ProcessorDetail>>),
}

impl StatusResponse {
    /// Decode the body returned for `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the endpoint when the body does not
    /// match its schema.
    pub fn parse(target: StatusTarget, body: Value) -> Result<Self, SchemaError> {
        let endpoint = target.name();
        let single = |source| SchemaError { endpoint, source };
        match target {
            StatusTarget::ApiVersion => serde_json::from_value(body)
                .map(Self::ApiVersion)
                .map_err(single),
            StatusTarget::Adapters => serde_json::from_value(body)
                .map(Self::Adapters)
                .map_err(single),
            StatusTarget::DetectorConfig => serde_json::from_value(body)
                .map(Self::DetectorConfig)
                .map_err(single),
            StatusTarget::DetectorStatus => serde_json::from_value(body)
                .map(Self::DetectorStatus)
                .map_err(single),
            StatusTarget::Receivers => parse_units(endpoint, body).map(Self::Receivers),
            StatusTarget::Processors => parse_units(endpoint, body).map(Self::Processors),
        }
    }

    /// The endpoint this response belongs to.
    #[must_use]
    pub fn target(&self) -> StatusTarget {
        match self {
            Self::ApiVersion(_) => StatusTarget::ApiVersion,
            Self::Adapters(_) => StatusTarget::Adapters,
            Self::DetectorConfig(_) => StatusTarget::DetectorConfig,
            Self::DetectorStatus(_) => StatusTarget::DetectorStatus,
            Self::Receivers(_) => StatusTarget::Receivers,
            Self::Processors(_) => StatusTarget::Processors,
        }
    }
}
