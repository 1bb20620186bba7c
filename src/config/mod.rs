pub mod settings;
pub mod store;

pub use settings::{Config, ConfigError, LogRotation};
pub use store::{ConfigSource, SettingsStore};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("giphy");

    fs::create_dir_all(&config_dir)
        .context("Failed to create config directory")?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from the default location, or create it if missing
pub fn load_or_create_config() -> Result<Config> {
    let path = config_path()?;

    if path.exists() {
        load_config_from(&path)
    } else {
        let config = Config::default();
        save_config_to(&path, &config)?;

        println!("Created default config at: {}", path.display());
        println!("Please edit this file to add your Giphy api key.");

        Ok(config)
    }
}

/// Load configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Save configuration to an explicit path
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;
    fs::write(path, content)
        .context("Failed to write config file")?;
    Ok(())
}
