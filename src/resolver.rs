use std::sync::Mutex;

use crate::command::CommandContext;
use crate::config::Config;
use crate::error::{GiphyError, Result};
use crate::search::{FullAsset, GifProvider};

/// Message posted to the room once a gif has been chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub sender: String,
    pub room: String,
    pub attachment_url: String,
}

/// Destination for posted messages (the host's message creator)
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn post(&self, message: PostedMessage) -> anyhow::Result<()>;
}

/// Sink that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<PostedMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<PostedMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl MessageSink for MemorySink {
    async fn post(&self, message: PostedMessage) -> anyhow::Result<()> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message);
        Ok(())
    }
}

/// Fetch the full asset for `item_id` and post it back to the invoking room.
///
/// The id is not checked against the latest search; whatever upstream
/// currently serves for it is posted.
pub async fn resolve(
    item_id: &str,
    ctx: &CommandContext,
    config: &Config,
    provider: &dyn GifProvider,
    sink: &dyn MessageSink,
) -> Result<FullAsset> {
    let asset = provider.fetch(item_id, config).await?;

    tracing::debug!(item_id = %item_id, room = %ctx.room, "posting selected gif");

    sink.post(PostedMessage {
        sender: ctx.sender.clone(),
        room: ctx.room.clone(),
        attachment_url: asset.url.clone(),
    })
    .await
    .map_err(GiphyError::Delivery)?;

    Ok(asset)
}
