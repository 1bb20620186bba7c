//! Tests for the settings validator and the settings store hook

mod common;

use common::{search_body, GiphyFixture, TEST_KEY};
use giphy::config::{ConfigError, ConfigSource, SettingsStore};
use giphy::validator::{self, PROBE_LIMIT, PROBE_QUERY};
use giphy::GiphyError;

#[tokio::test]
async fn test_blank_key_rejected_without_network() {
    let mut fixture = GiphyFixture::start().await;
    let mock = fixture.mock_no_requests().await;

    let mut config = fixture.config(50, 5);
    config.api_key = String::new();

    let err = validator::validate(&config, fixture.provider().as_ref())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        GiphyError::InvalidConfiguration(ConfigError::MissingKey)
    ));
    assert_eq!(err.to_string(), "Invalid configuration: missing key");
}

#[tokio::test]
async fn test_probe_accepts_working_key() {
    let mut fixture = GiphyFixture::start().await;
    let mock = fixture
        .mock_search(PROBE_QUERY, PROBE_LIMIT, 200, search_body(&["probe"]))
        .await;

    validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .expect("key should be accepted");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_probe_without_data_rejects_key() {
    let mut fixture = GiphyFixture::start().await;
    let _mock = fixture
        .mock_search(PROBE_QUERY, PROBE_LIMIT, 200, r#"{"meta": {"status": 200}}"#.to_string())
        .await;

    let err = validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GiphyError::InvalidConfiguration(ConfigError::KeyRejected(_))
    ));
}

#[tokio::test]
async fn test_probe_unauthorized_rejects_key() {
    let mut fixture = GiphyFixture::start().await;
    let _mock = fixture
        .mock_search(
            PROBE_QUERY,
            PROBE_LIMIT,
            401,
            r#"{"message": "Invalid authentication credentials"}"#.to_string(),
        )
        .await;

    let err = validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    match err {
        GiphyError::InvalidConfiguration(ConfigError::KeyRejected(reason)) => {
            assert!(reason.contains("401"));
            assert!(!reason.contains(TEST_KEY));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_outage_is_not_a_key_rejection() {
    let mut fixture = GiphyFixture::start().await;
    let _mock = fixture
        .mock_search(
            PROBE_QUERY,
            PROBE_LIMIT,
            503,
            r#"{"meta": {"status": 503, "msg": "Service Unavailable"}}"#.to_string(),
        )
        .await;

    let err = validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    match err {
        GiphyError::Upstream { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_not_a_key_rejection() {
    let mut fixture = GiphyFixture::start().await;
    let _mock = fixture
        .mock_search(
            PROBE_QUERY,
            PROBE_LIMIT,
            429,
            r#"{"message": "API rate limit exceeded"}"#.to_string(),
        )
        .await;

    let err = validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    assert!(
        matches!(err, GiphyError::Upstream { status: Some(429), .. }),
        "unexpected error: {err:?}"
    );
    assert!(!err.to_string().contains("key rejected"));
}

#[tokio::test]
async fn test_forbidden_rejects_key() {
    let mut fixture = GiphyFixture::start().await;
    let _mock = fixture
        .mock_search(
            PROBE_QUERY,
            PROBE_LIMIT,
            403,
            r#"{"message": "Forbidden"}"#.to_string(),
        )
        .await;

    let err = validator::validate(&fixture.config(50, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GiphyError::InvalidConfiguration(ConfigError::KeyRejected(_))
    ));
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    let fixture = GiphyFixture::start().await;
    let mut config = fixture.config(50, 5);
    config.api_base = Some("http://127.0.0.1:1".to_string());

    let err = validator::validate(&config, fixture.provider().as_ref())
        .await
        .unwrap_err();

    assert!(err.is_network(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_invalid_limits_rejected_before_probe() {
    let mut fixture = GiphyFixture::start().await;
    let mock = fixture.mock_no_requests().await;

    let err = validator::validate(&fixture.config(3, 5), fixture.provider().as_ref())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        GiphyError::InvalidConfiguration(ConfigError::DisplayLimitExceedsResultLimit {
            display: 5,
            limit: 3
        })
    ));
}

#[tokio::test]
async fn test_store_keeps_previous_config_on_rejection() {
    let mut fixture = GiphyFixture::start().await;
    let original = fixture.config(50, 5);
    let store = SettingsStore::new(original.clone());
    let provider = fixture.provider();

    let mut blank = original.clone();
    blank.api_key = String::new();
    assert!(store.apply(blank, provider.as_ref()).await.is_err());
    assert_eq!(*store.snapshot(), original);

    let _probe = fixture
        .mock_search(PROBE_QUERY, PROBE_LIMIT, 200, search_body(&["probe"]))
        .await;
    let updated = fixture.config(20, 4);
    store.apply(updated.clone(), provider.as_ref()).await.unwrap();
    assert_eq!(*store.snapshot(), updated);
}

#[tokio::test]
async fn test_snapshot_taken_before_update_is_unchanged() {
    let mut fixture = GiphyFixture::start().await;
    let store = SettingsStore::new(fixture.config(50, 5));
    let before = store.snapshot();

    let _probe = fixture
        .mock_search(PROBE_QUERY, PROBE_LIMIT, 200, search_body(&["probe"]))
        .await;
    store
        .apply(fixture.config(10, 2), fixture.provider().as_ref())
        .await
        .unwrap();

    assert_eq!(before.result_limit, 50);
    assert_eq!(store.snapshot().result_limit, 10);
}
