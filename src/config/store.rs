use std::sync::{Arc, RwLock};

use super::Config;
use crate::error::Result;
use crate::search::GifProvider;
use crate::validator;

/// Hands out the configuration current at the start of an invocation.
pub trait ConfigSource: Send + Sync {
    fn snapshot(&self) -> Arc<Config>;
}

/// In-process settings store.
///
/// Readers always get a whole `Config`; a new one only becomes visible after
/// it passes validation.
pub struct SettingsStore {
    current: RwLock<Arc<Config>>,
}

impl SettingsStore {
    pub fn new(config: Config) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Settings-changed hook: validate `candidate` against upstream and adopt it.
    ///
    /// On failure the previous configuration stays in effect.
    pub async fn apply(&self, candidate: Config, provider: &dyn GifProvider) -> Result<()> {
        validator::validate(&candidate, provider).await?;

        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(candidate);

        tracing::info!("settings updated");
        Ok(())
    }
}

impl ConfigSource for SettingsStore {
    fn snapshot(&self) -> Arc<Config> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
