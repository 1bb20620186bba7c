//! Random selection of the candidates shown in a preview.

use rand::Rng;

use crate::config::ConfigError;

/// Distinct indices into a candidate pool, in the order they were drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSelection {
    indices: Vec<usize>,
}

impl SampleSelection {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Sample `display_limit` distinct indices from `0..pool_len` with the thread rng.
pub fn sample(pool_len: usize, display_limit: usize) -> Result<SampleSelection, ConfigError> {
    sample_with(&mut rand::rng(), pool_len, display_limit)
}

/// Sample `display_limit` distinct indices from `0..pool_len`.
///
/// Draws are bounded by the pool actually returned, not the configured result
/// limit, so an upstream that returns fewer results is reported instead of
/// indexed past its end.
pub fn sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    pool_len: usize,
    display_limit: usize,
) -> Result<SampleSelection, ConfigError> {
    if display_limit > pool_len {
        return Err(ConfigError::DisplayLimitExceedsPool {
            display: display_limit,
            available: pool_len,
        });
    }

    let indices = rand::seq::index::sample(rng, pool_len, display_limit).into_vec();

    tracing::trace!(pool_len, display_limit, ?indices, "sampled preview indices");

    Ok(SampleSelection { indices })
}
