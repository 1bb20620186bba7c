use crate::config::ConfigError;

/// Errors surfaced to the invoking context (command, preview pick, settings hook)
#[derive(Debug, thiserror::Error)]
pub enum GiphyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Transport-level failure reaching the upstream API.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream answered, but not with something we can use.
    #[error("Upstream error{}: {message}", fmt_status(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Gif id cannot be empty")]
    EmptyItemId,

    #[error("Failed to post message: {0}")]
    Delivery(#[source] anyhow::Error),
}

impl GiphyError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// True when the failure happened before any upstream call could complete.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for GiphyError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the api key as a query parameter.
        Self::Network(err.without_url())
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

pub type Result<T, E = GiphyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_includes_status() {
        let err = GiphyError::Upstream {
            status: Some(404),
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error (HTTP 404): not found");

        let err = GiphyError::upstream("missing data");
        assert_eq!(err.to_string(), "Upstream error: missing data");
    }

    #[test]
    fn test_config_error_wraps_as_invalid_configuration() {
        let err: GiphyError = ConfigError::MissingKey.into();
        assert!(matches!(
            err,
            GiphyError::InvalidConfiguration(ConfigError::MissingKey)
        ));
        assert!(err.to_string().contains("missing key"));
    }
}
