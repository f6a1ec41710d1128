//! REST paths of the detector control server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A polled or one-shot status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTarget {
    /// `GET /api`
    ApiVersion,
    /// `GET /api/{v}/adapters/`
    Adapters,
    /// `GET /api/{v}/eiger/detector/api/{sub}/config`
    DetectorConfig,
    /// `GET /api/{v}/eiger/detector/api/{sub}/status`
    DetectorStatus,
    /// `GET /api/{v}/fr/status/`
    Receivers,
    /// `GET /api/{v}/fp/status/`
    Processors,
}

impl StatusTarget {
    /// Every target, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::ApiVersion,
        Self::Adapters,
        Self::DetectorConfig,
        Self::DetectorStatus,
        Self::Receivers,
        Self::Processors,
    ];

    /// Short endpoint name used in logs and schema errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ApiVersion => "api",
            Self::Adapters => "adapters",
            Self::DetectorConfig => "detector/config",
            Self::DetectorStatus => "detector/status",
            Self::Receivers => "fr/status",
            Self::Processors => "fp/status",
        }
    }

    /// Server path for this target.
    #[must_use]
    pub fn path(self, paths: &ApiPaths) -> String {
        match self {
            Self::ApiVersion => "/api".to_string(),
            Self::Adapters => paths.versioned("adapters/"),
            Self::DetectorConfig => paths.detector("config"),
            Self::DetectorStatus => paths.detector("status"),
            Self::Receivers => paths.versioned("fr/status/"),
            Self::Processors => paths.versioned("fp/status/"),
        }
    }
}

impl fmt::Display for StatusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for versioned API paths.
///
/// `version` is the control server API version (from `GET /api`);
/// `detector_api` is the Eiger SIMPLON API version the detector adapter
/// proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    version: String,
    detector_api: String,
}

impl ApiPaths {
    #[must_use]
    pub fn new(version: impl Into<String>, detector_api: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            detector_api: detector_api.into(),
        }
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `/api/{v}/{rest}`
    #[must_use]
    pub fn versioned(&self, rest: &str) -> String {
        format!("/api/{}/{rest}", self.version)
    }

    /// `/api/{v}/eiger/detector/api/{sub}/{rest}`
    #[must_use]
    pub fn detector(&self, rest: &str) -> String {
        self.versioned(&format!("eiger/detector/api/{}/{rest}", self.detector_api))
    }

    /// `/api/{v}/fp/config/{rest}`
    #[must_use]
    pub fn processor_config(&self, rest: &str) -> String {
        self.versioned(&format!("fp/config/{rest}"))
    }

    /// `/api/{v}/fp/command/{rest}`
    #[must_use]
    pub fn processor_command(&self, rest: &str) -> String {
        self.versioned(&format!("fp/command/{rest}"))
    }
}
