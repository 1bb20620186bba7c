use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.giphy.com";
pub const DEFAULT_RESULT_LIMIT: usize = 50;
pub const DEFAULT_RESULT_DISPLAY_LIMIT: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Plugin configuration: credentials, limits and diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Giphy API key
    #[serde(default)]
    pub api_key: String,

    /// Number of gifs pulled per search request
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Number of gifs shown in a preview
    #[serde(default = "default_result_display_limit")]
    pub result_display_limit: usize,

    /// Optional custom API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file (or directory) used when `debug` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<LogRotation>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            result_limit: DEFAULT_RESULT_LIMIT,
            result_display_limit: DEFAULT_RESULT_DISPLAY_LIMIT,
            api_base: Some(DEFAULT_API_BASE.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
        }
    }
}

impl Config {
    /// Config with the given key and default limits
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    /// Per-request timeout, read on every call so settings updates apply.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Current value of a settings-surface entry; secrets are masked.
    pub fn setting_value(&self, id: &str) -> Option<String> {
        match id {
            "api_key" if self.has_api_key() => Some("********".to_string()),
            "api_key" => Some(String::new()),
            "result_limit" => Some(self.result_limit.to_string()),
            "result_display_limit" => Some(self.result_display_limit.to_string()),
            _ => None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Check the limit relationships that need no network access.
    pub fn check_limits(&self) -> Result<(), ConfigError> {
        if self.result_limit == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "result_limit",
            });
        }
        if self.result_display_limit == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "result_display_limit",
            });
        }
        if self.result_display_limit > self.result_limit {
            return Err(ConfigError::DisplayLimitExceedsResultLimit {
                display: self.result_display_limit,
                limit: self.result_limit,
            });
        }
        Ok(())
    }

    /// Everything a search invocation needs before touching the network.
    pub fn ensure_searchable(&self) -> Result<(), ConfigError> {
        if !self.has_api_key() {
            return Err(ConfigError::MissingKey);
        }
        self.check_limits()
    }
}

/// How the debug log file is rotated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Daily,
}

/// Reasons a configuration is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing key")]
    MissingKey,

    #[error("key rejected by upstream: {0}")]
    KeyRejected(String),

    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error("result_display_limit ({display}) exceeds result_limit ({limit})")]
    DisplayLimitExceedsResultLimit { display: usize, limit: usize },

    #[error("result_display_limit ({display}) exceeds the {available} results returned")]
    DisplayLimitExceedsPool { display: usize, available: usize },

    #[error("invalid api_base: {0}")]
    InvalidApiBase(String),
}

/// A value the host settings surface should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDescriptor {
    pub id: &'static str,
    pub kind: SettingKind,
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub public: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Secret,
    Number,
}

pub const SETTINGS: [SettingDescriptor; 3] = [
    SettingDescriptor {
        id: "api_key",
        kind: SettingKind::Secret,
        label: "Giphy Api Key",
        description: "The api key that giphy has provided",
        required: true,
        public: false,
    },
    SettingDescriptor {
        id: "result_limit",
        kind: SettingKind::Number,
        label: "Maximum Pulled Gifs",
        description: "Total number of gifs per request",
        required: true,
        public: false,
    },
    SettingDescriptor {
        id: "result_display_limit",
        kind: SettingKind::Number,
        label: "Preview Display Amount",
        description: "The number of results returned in a preview",
        required: true,
        public: false,
    },
];

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_result_display_limit() -> usize {
    DEFAULT_RESULT_DISPLAY_LIMIT
}
