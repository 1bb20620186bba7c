use std::sync::Arc;

use crate::config::ConfigSource;
use crate::error::{GiphyError, Result};
use crate::preview::{self, Preview};
use crate::resolver::{self, MessageSink};
use crate::sampler;
use crate::search::{self, FullAsset, GifProvider};

/// Who invoked the command, where, and with which arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub sender: String,
    pub room: String,
    pub arguments: Vec<String>,
}

impl CommandContext {
    pub fn new(
        sender: impl Into<String>,
        room: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            room: room.into(),
            arguments,
        }
    }
}

/// The `giphy` slash command: search, preview a random sample, post the pick
pub struct GiphyCommand {
    provider: Arc<dyn GifProvider>,
    settings: Arc<dyn ConfigSource>,
}

impl GiphyCommand {
    pub const NAME: &'static str = "giphy";
    pub const DESCRIPTION: &'static str = "Get your giphy on";

    pub fn new(provider: Arc<dyn GifProvider>, settings: Arc<dyn ConfigSource>) -> Self {
        Self { provider, settings }
    }

    /// Search for the invocation's query and return a random preview sample.
    pub async fn previewer(&self, ctx: &CommandContext) -> Result<Preview> {
        let config = self.settings.snapshot();
        config.ensure_searchable()?;

        let query = search::build_query(&ctx.arguments).ok_or(GiphyError::EmptyQuery)?;

        let pool = self
            .provider
            .search(&query, config.result_limit, &config)
            .await?;

        let selection = sampler::sample(pool.len(), config.result_display_limit)?;
        let items = preview::assemble(&pool, &selection);

        tracing::debug!(
            query = %query,
            pool_len = pool.len(),
            shown = items.len(),
            "preview assembled"
        );

        Ok(Preview::new(items))
    }

    /// Post the preview item the user picked.
    pub async fn execute_preview_item(
        &self,
        item_id: &str,
        ctx: &CommandContext,
        sink: &dyn MessageSink,
    ) -> Result<FullAsset> {
        let config = self.settings.snapshot();
        resolver::resolve(item_id, ctx, &config, self.provider.as_ref(), sink).await
    }
}
