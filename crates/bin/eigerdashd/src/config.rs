//! Configuration loading: a TOML file with environment variable overrides.
//!
//! Looks for `eigerdash.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::time::Duration;

use eigerdash_app::dashboard::DashboardSettings;
use eigerdash_app::services::poller::PollerConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard listener.
    pub server: ServerConfig,
    /// Detector control server.
    pub api: ApiConfig,
    /// Polling periods and table sizing.
    pub polling: PollingConfig,
    /// Page settings.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Control server connection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme, host and port of the control server.
    pub base_url: String,
    /// API version used until `GET /api` answers.
    pub version: String,
    /// Detector sub-API version.
    pub detector_api: String,
    /// Per-request timeout in milliseconds; `0` disables it.
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub detector_interval_ms: u64,
    pub units_interval_ms: u64,
    /// Minimum number of rows in each unit table.
    pub table_rows: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title without the panel suffix.
    pub title: String,
    /// Page auto-reload period; `0` disables it.
    pub refresh_secs: u32,
    /// View shown at startup, e.g. `#/home-view`.
    pub initial_fragment: String,
    /// Directory served under `/img` (indicator images); empty disables it.
    pub assets_dir: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `eigerdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("eigerdash.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("EIGERDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("EIGERDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("EIGERDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("EIGERDASH_API_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("EIGERDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.polling.detector_interval_ms == 0 || self.polling.units_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "polling intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.api.timeout_ms > 0).then(|| Duration::from_millis(self.api.timeout_ms))
    }

    #[must_use]
    pub fn poller(&self) -> PollerConfig {
        PollerConfig {
            detector_interval: Duration::from_millis(self.polling.detector_interval_ms),
            units_interval: Duration::from_millis(self.polling.units_interval_ms),
        }
    }

    #[must_use]
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            base_title: self.dashboard.title.clone(),
            default_api_version: self.api.version.clone(),
            detector_api: self.api.detector_api.clone(),
            table_rows: self.polling.table_rows,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let settings = DashboardSettings::default();
        Self {
            base_url: "http://127.0.0.1:8888".to_string(),
            version: settings.default_api_version,
            detector_api: settings.detector_api,
            timeout_ms: 2000,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            detector_interval_ms: 100,
            units_interval_ms: 500,
            table_rows: DashboardSettings::default().table_rows,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DashboardSettings::default().base_title,
            refresh_secs: 2,
            initial_fragment: "#/home-view".to_string(),
            assets_dir: "img".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "eigerdashd=info,eigerdash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
