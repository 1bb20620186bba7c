use crate::config::{Config, ConfigError};
use crate::error::{GiphyError, Result};
use crate::search::GifProvider;

pub const PROBE_QUERY: &str = "test";
pub const PROBE_LIMIT: usize = 1;

/// Check a candidate configuration, probing upstream with its api key.
///
/// A blank key is refused without any request. A 401/403, or a successful
/// answer without a result collection, becomes `ConfigError::KeyRejected`.
/// Other upstream statuses (outages, rate limits) say nothing about the key
/// and stay `GiphyError::Upstream`; transport failures stay `GiphyError::Network`.
pub async fn validate(config: &Config, provider: &dyn GifProvider) -> Result<()> {
    if !config.has_api_key() {
        tracing::warn!("settings rejected: api key is blank");
        return Err(ConfigError::MissingKey.into());
    }
    config.check_limits()?;

    match provider.search(PROBE_QUERY, PROBE_LIMIT, config).await {
        Ok(_) => {
            tracing::debug!("api key accepted by upstream");
            Ok(())
        }
        Err(GiphyError::Upstream { status, message }) if rejects_key(status) => {
            tracing::warn!(status = ?status, error = %message, "api key rejected by upstream");
            let reason = match status {
                Some(code) => format!("HTTP {code}: {message}"),
                None => message,
            };
            Err(ConfigError::KeyRejected(reason).into())
        }
        Err(err) => {
            tracing::warn!(error = %err, "settings probe failed");
            Err(err)
        }
    }
}

/// `None` means upstream answered 2xx but the body had no usable results.
fn rejects_key(status: Option<u16>) -> bool {
    matches!(status, None | Some(401) | Some(403))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_failures_reject_key() {
        assert!(rejects_key(None));
        assert!(rejects_key(Some(401)));
        assert!(rejects_key(Some(403)));
        assert!(!rejects_key(Some(429)));
        assert!(!rejects_key(Some(500)));
        assert!(!rejects_key(Some(503)));
    }
}
