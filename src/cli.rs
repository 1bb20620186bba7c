use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::command::{CommandContext, GiphyCommand};
use crate::config::settings::SETTINGS;
use crate::config::{self, Config, SettingsStore};
use crate::logging;
use crate::preview::Preview;
use crate::resolver::{MessageSink, PostedMessage};
use crate::search::providers::GiphyProvider;
use crate::search::GifProvider;
use crate::validator;

#[derive(Debug, Parser)]
#[command(name = GiphyCommand::NAME, version, about = GiphyCommand::DESCRIPTION)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the api key stored in the config file
    #[arg(long, env = "GIPHY_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and preview gifs, then post one
    Search {
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Post the Nth preview item without prompting
        #[arg(long)]
        pick: Option<usize>,

        #[command(flatten)]
        target: Target,
    },
    /// Post a gif by id
    Post {
        id: String,

        #[command(flatten)]
        target: Target,
    },
    /// Probe upstream with the configured api key
    Validate,
    /// Show the values offered on the settings surface
    Settings,
}

#[derive(Debug, Args)]
pub struct Target {
    #[arg(long, default_value = "cli")]
    pub sender: String,

    #[arg(long, default_value = "local")]
    pub room: String,
}

/// Prints posted messages to stdout
pub struct StdoutSink;

#[async_trait::async_trait]
impl MessageSink for StdoutSink {
    async fn post(&self, message: PostedMessage) -> Result<()> {
        println!("[{}] {}: {}", message.room, message.sender, message.attachment_url);
        Ok(())
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_or_create_config()?,
    };
    if let Some(key) = cli.api_key {
        config.api_key = key;
    }

    let _log_guard = logging::init(&config)?;

    let provider: Arc<dyn GifProvider> = Arc::new(GiphyProvider::new()?);

    match cli.command {
        Command::Settings => print_settings(&config),
        Command::Validate => {
            validator::validate(&config, provider.as_ref()).await?;
            println!("Configuration accepted");
        }
        Command::Post { id, target } => {
            let command = GiphyCommand::new(provider, Arc::new(SettingsStore::new(config)));
            let ctx = CommandContext::new(target.sender, target.room, Vec::new());
            command.execute_preview_item(&id, &ctx, &StdoutSink).await?;
        }
        Command::Search {
            query,
            pick,
            target,
        } => {
            let command = GiphyCommand::new(provider, Arc::new(SettingsStore::new(config)));
            let ctx = CommandContext::new(target.sender, target.room, query);

            let preview = command.previewer(&ctx).await?;
            print_preview(&preview);

            let choice = match pick {
                Some(n) => Some(n),
                None => prompt_choice(preview.items.len()).await?,
            };
            let Some(n) = choice else {
                return Ok(());
            };

            let item = n
                .checked_sub(1)
                .and_then(|idx| preview.items.get(idx))
                .with_context(|| format!("No preview item {n} (1-{})", preview.items.len()))?;

            command.execute_preview_item(&item.id, &ctx, &StdoutSink).await?;
        }
    }

    Ok(())
}

fn print_settings(config: &Config) {
    for descriptor in SETTINGS {
        let value = config.setting_value(descriptor.id).unwrap_or_default();
        println!("{:<22} {:<24} {}", descriptor.id, descriptor.label, value);
    }
}

fn print_preview(preview: &Preview) {
    println!("{}", preview.title);
    for (idx, item) in preview.items.iter().enumerate() {
        println!("{:>3}. {}  {}", idx + 1, item.id, item.display_ref);
    }
}

/// Ask for a 1-based item number; an empty answer cancels.
async fn prompt_choice(count: usize) -> Result<Option<usize>> {
    if count == 0 {
        return Ok(None);
    }

    let line = tokio::task::spawn_blocking(move || -> Result<String> {
        print!("Pick 1-{count} (enter to cancel): ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line)
    })
    .await
    .context("Prompt task failed")??;

    let answer = line.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let n = answer
        .parse::<usize>()
        .with_context(|| format!("Not a number: {answer}"))?;
    Ok(Some(n))
}
