use crate::config::{Config, ConfigError};
use crate::error::{GiphyError, Result};
use crate::logging::redact_api_key;
use crate::search::{Candidate, CandidatePool, FullAsset, GifProvider};
use reqwest::Url;
use serde::Deserialize;

/// Giphy API provider
///
/// Endpoints, the api key and the request timeout all come from the `Config`
/// snapshot passed to each call; nothing from settings is stored here.
/// Documentation: https://developers.giphy.com/docs/api/endpoint
pub struct GiphyProvider {
    client: reqwest::Client,
}

impl GiphyProvider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// `{api_base}/v1/gifs/{segments...}` with each segment percent-encoded
    fn endpoint(config: &Config, segments: &[&str]) -> Result<Url, ConfigError> {
        let base = config.api_base();
        let mut url = Url::parse(base).map_err(|e| ConfigError::InvalidApiBase(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidApiBase(base.to_string()))?
            .pop_if_empty()
            .extend(["v1", "gifs"])
            .extend(segments);

        Ok(url)
    }

    /// Turn a response into its body text, or an upstream error for non-2xx.
    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                error = %redact_api_key(&body),
                "giphy api error"
            );
            return Err(GiphyError::Upstream {
                status: Some(status.as_u16()),
                message: upstream_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
            });
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl GifProvider for GiphyProvider {
    async fn search(&self, query: &str, limit: usize, config: &Config) -> Result<CandidatePool> {
        if !config.has_api_key() {
            return Err(ConfigError::MissingKey.into());
        }
        if query.trim().is_empty() {
            return Err(GiphyError::EmptyQuery);
        }

        let url = Self::endpoint(config, &["search"])?;

        tracing::debug!(query = %query, limit, "performing giphy search");

        let response = self
            .client
            .get(url)
            .timeout(config.timeout())
            .header("Accept", "application/json")
            .query(&[
                ("api_key", config.api_key.as_str()),
                ("limit", &limit.to_string()),
                ("q", query),
            ])
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let pool = parse_search(&body)?;

        tracing::debug!(
            query = %query,
            result_count = pool.len(),
            "giphy search completed"
        );

        Ok(pool)
    }

    async fn fetch(&self, id: &str, config: &Config) -> Result<FullAsset> {
        if !config.has_api_key() {
            return Err(ConfigError::MissingKey.into());
        }
        if id.trim().is_empty() {
            return Err(GiphyError::EmptyItemId);
        }

        let url = Self::endpoint(config, &[id])?;

        tracing::debug!(item_id = %id, "fetching giphy item");

        let response = self
            .client
            .get(url)
            .timeout(config.timeout())
            .header("Accept", "application/json")
            .query(&[("api_key", config.api_key.as_str())])
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        parse_item(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    data: Option<Vec<RawGif>>,
}

#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    #[serde(default)]
    data: Option<RawGif>,
}

#[derive(Debug, Deserialize)]
struct RawGif {
    id: String,
    #[serde(default)]
    title: String,
    images: RawImages,
}

#[derive(Debug, Deserialize)]
struct RawImages {
    #[serde(default)]
    fixed_height_small: Option<Rendition>,
    #[serde(default)]
    original: Option<Rendition>,
}

#[derive(Debug, Deserialize)]
struct Rendition {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    meta: Option<ErrorMeta>,
}

#[derive(Debug, Deserialize)]
struct ErrorMeta {
    #[serde(default)]
    msg: Option<String>,
}

fn rendition_url(rendition: Option<Rendition>, gif_id: &str, name: &str) -> Result<String> {
    rendition
        .and_then(|r| r.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| GiphyError::upstream(format!("gif {gif_id} has no {name} url")))
}

fn parse_search(body: &str) -> Result<CandidatePool> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .map_err(|e| GiphyError::upstream(format!("malformed search response: {e}")))?;

    let gifs = envelope
        .data
        .ok_or_else(|| GiphyError::upstream("search response has no data collection"))?;

    let candidates = gifs
        .into_iter()
        .map(|gif| {
            let preview_url = rendition_url(gif.images.fixed_height_small, &gif.id, "fixed_height_small")?;
            let full_url = rendition_url(gif.images.original, &gif.id, "original")?;
            Ok(Candidate {
                id: gif.id,
                title: gif.title,
                preview_url,
                full_url,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CandidatePool::new(candidates))
}

fn parse_item(body: &str) -> Result<FullAsset> {
    let envelope: ItemEnvelope = serde_json::from_str(body)
        .map_err(|e| GiphyError::upstream(format!("malformed item response: {e}")))?;

    let gif = envelope
        .data
        .ok_or_else(|| GiphyError::upstream("item response has no data"))?;

    let url = rendition_url(gif.images.original, &gif.id, "original")?;
    Ok(FullAsset { id: gif.id, url })
}

/// Best-effort extraction of giphy's error text (`meta.msg` or `message`).
fn upstream_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .meta
        .and_then(|m| m.msg)
        .or(envelope.message)
        .map(|msg| redact_api_key(&msg))
}
