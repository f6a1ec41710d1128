//! Commands: user actions translated into PUT sequences.
//!
//! A [`Command`] expands into one or more [`PutRequest`]s, in the order they
//! must be issued. Requests are independent of each other: nothing waits
//! for a predecessor and nothing is rolled back.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::endpoint::ApiPaths;
use crate::error::ValidationError;

/// Detector state machine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorAction {
    Initialize,
    Arm,
    Trigger,
    Disarm,
    Cancel,
    Abort,
}

impl DetectorAction {
    pub const ALL: [Self; 6] = [
        Self::Initialize,
        Self::Arm,
        Self::Trigger,
        Self::Disarm,
        Self::Cancel,
        Self::Abort,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Arm => "arm",
            Self::Trigger => "trigger",
            Self::Disarm => "disarm",
            Self::Cancel => "cancel",
            Self::Abort => "abort",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

impl fmt::Display for DetectorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single write against the control server.
#[derive(Debug, Clone, PartialEq)]
pub struct PutRequest {
    pub path: String,
    /// JSON body; `None` sends no payload.
    pub body: Option<Value>,
}

impl PutRequest {
    fn with_body(path: String, body: Value) -> Self {
        Self {
            path,
            body: Some(body),
        }
    }

    fn empty(path: String) -> Self {
        Self { path, body: None }
    }
}

/// A user action against the detector or the file writers.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Exposure time in seconds.
    SetExposure(f64),
    /// Acquisition period in seconds.
    SetPeriod(f64),
    /// Images per acquisition.
    SetImageCount(u64),
    /// File writer parameters, always sent as a group.
    ProcessorParams {
        frames: u64,
        path: String,
        filename: String,
    },
    /// Reset statistics, select the `data` master dataset, enable writing.
    StartWriting,
    /// Disable writing.
    StopWriting,
    Detector(DetectorAction),
}

impl Command {
    /// Parse the exposure input field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the input is not a non-negative number.
    pub fn exposure(input: &str) -> Result<Self, ValidationError> {
        parse_seconds("exposure", input).map(Self::SetExposure)
    }

    /// Parse the acquisition period input field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the input is not a non-negative number.
    pub fn period(input: &str) -> Result<Self, ValidationError> {
        parse_seconds("period", input).map(Self::SetPeriod)
    }

    /// Parse the image count input field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the input is not a whole number.
    pub fn image_count(input: &str) -> Result<Self, ValidationError> {
        parse_count("nimages", input).map(Self::SetImageCount)
    }

    /// Parse the three file writer input fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `frames` is not a whole number.
    pub fn processor_params(
        frames: &str,
        path: &str,
        filename: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self::ProcessorParams {
            frames: parse_count("frames", frames)?,
            path: path.trim().to_string(),
            filename: filename.trim().to_string(),
        })
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetExposure(_) => "set_exposure",
            Self::SetPeriod(_) => "set_period",
            Self::SetImageCount(_) => "set_image_count",
            Self::ProcessorParams { .. } => "processor_params",
            Self::StartWriting => "start_writing",
            Self::StopWriting => "stop_writing",
            Self::Detector(_) => "detector_command",
        }
    }

    /// PUT requests for this command, in issue order.
    #[must_use]
    pub fn requests(&self, paths: &ApiPaths) -> Vec<PutRequest> {
        match self {
            Self::SetExposure(seconds) => vec![PutRequest::with_body(
                paths.detector("config/count_time"),
                json!(seconds),
            )],
            Self::SetPeriod(seconds) => vec![PutRequest::with_body(
                paths.detector("config/frame_time"),
                json!(seconds),
            )],
            Self::SetImageCount(count) => vec![PutRequest::with_body(
                paths.detector("config/nimages"),
                json!(count),
            )],
            Self::ProcessorParams {
                frames,
                path,
                filename,
            } => vec![
                PutRequest::with_body(paths.processor_config("hdf/frames"), json!(frames)),
                PutRequest::with_body(paths.processor_config("hdf/file/path"), json!(path)),
                PutRequest::with_body(paths.processor_config("hdf/file/name"), json!(filename)),
            ],
            Self::StartWriting => vec![
                PutRequest::empty(paths.processor_command("reset_statistics")),
                PutRequest::with_body(paths.processor_config("hdf/master"), json!("data")),
                PutRequest::with_body(paths.processor_config("hdf/write"), json!(1)),
            ],
            Self::StopWriting => vec![PutRequest::with_body(
                paths.processor_config("hdf/write"),
                json!(0),
            )],
            Self::Detector(action) => vec![PutRequest::empty(
                paths.detector(&format!("command/{action}")),
            )],
        }
    }
}

fn parse_seconds(field: &'static str, input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.is_sign_positive())
        .ok_or_else(|| ValidationError::NotANumber {
            field,
            input: input.to_string(),
        })
}

fn parse_count(field: &'static str, input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            input: input.to_string(),
        })
}
