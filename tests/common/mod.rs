//! Common test utilities: a mocked Giphy API and canned responses
#![allow(dead_code)]

use giphy::command::CommandContext;
use giphy::config::Config;
use giphy::search::providers::GiphyProvider;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_KEY: &str = "test-key";

/// Mocked Giphy API backed by a local mockito server
pub struct GiphyFixture {
    pub server: ServerGuard,
}

impl GiphyFixture {
    pub async fn start() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    /// Config pointing at the mock server with the given limits
    pub fn config(&self, result_limit: usize, result_display_limit: usize) -> Config {
        Config {
            api_base: Some(self.server.url()),
            timeout_secs: Some(5),
            result_limit,
            result_display_limit,
            ..Config::with_api_key(TEST_KEY)
        }
    }

    pub fn provider(&self) -> Arc<GiphyProvider> {
        Arc::new(GiphyProvider::new().expect("Failed to build provider"))
    }

    /// Expect one search request for `query` with `limit`, answering `body`
    pub async fn mock_search(&mut self, query: &str, limit: usize, status: usize, body: String) -> Mock {
        self.server
            .mock("GET", "/v1/gifs/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), TEST_KEY.into()),
                Matcher::UrlEncoded("limit".into(), limit.to_string()),
                Matcher::UrlEncoded("q".into(), query.into()),
            ]))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    /// Expect one item request for `id`, answering `body`
    pub async fn mock_item(&mut self, id: &str, status: usize, body: String) -> Mock {
        self.server
            .mock("GET", format!("/v1/gifs/{id}").as_str())
            .match_query(Matcher::UrlEncoded("api_key".into(), TEST_KEY.into()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    /// A catch-all that must never be hit
    pub async fn mock_no_requests(&mut self) -> Mock {
        self.server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}

pub fn gif_json(id: &str) -> Value {
    json!({
        "type": "gif",
        "id": id,
        "title": format!("gif {id}"),
        "images": {
            "fixed_height_small": { "url": preview_url(id), "width": "100", "height": "100" },
            "original": { "url": original_url(id), "width": "480", "height": "480" }
        }
    })
}

pub fn preview_url(id: &str) -> String {
    format!("https://media.giphy.test/{id}/100.gif")
}

pub fn original_url(id: &str) -> String {
    format!("https://media.giphy.test/{id}/giphy.gif")
}

/// Search response body with one gif per id
pub fn search_body<S: AsRef<str>>(ids: &[S]) -> String {
    let data: Vec<Value> = ids.iter().map(|id| gif_json(id.as_ref())).collect();
    json!({
        "data": data,
        "pagination": { "count": ids.len(), "offset": 0 },
        "meta": { "status": 200, "msg": "OK" }
    })
    .to_string()
}

pub fn item_body(id: &str) -> String {
    json!({ "data": gif_json(id), "meta": { "status": 200, "msg": "OK" } }).to_string()
}

pub fn not_found_body() -> String {
    json!({ "data": [], "meta": { "status": 404, "msg": "Not Found" } }).to_string()
}

pub fn context(args: &[&str]) -> CommandContext {
    CommandContext::new(
        "tester",
        "general",
        args.iter().map(|a| a.to_string()).collect(),
    )
}
