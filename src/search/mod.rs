pub mod providers;

use crate::config::Config;
use crate::error::Result;

/// Gif provider abstraction - different providers can be plugged in
#[async_trait::async_trait]
pub trait GifProvider: Send + Sync {
    /// Search for up to `limit` gifs matching `query`
    async fn search(&self, query: &str, limit: usize, config: &Config) -> Result<CandidatePool>;

    /// Fetch the full-resolution asset for a single gif id
    async fn fetch(&self, id: &str, config: &Config) -> Result<FullAsset>;
}

/// One searchable gif
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Provider id, opaque to us
    pub id: String,
    pub title: String,
    /// Small rendition used for previews
    pub preview_url: String,
    /// Original rendition
    pub full_url: String,
}

/// Candidates returned by one search, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}

impl std::ops::Index<usize> for CandidatePool {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }
}

impl From<Vec<Candidate>> for CandidatePool {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self::new(candidates)
    }
}

/// The asset posted once a preview item is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullAsset {
    pub id: String,
    pub url: String,
}

/// Join command arguments into a single query string.
///
/// Spaces are form-encoded as `+` on the wire.
pub fn build_query<S: AsRef<str>>(args: &[S]) -> Option<String> {
    let query = args
        .iter()
        .map(|arg| arg.as_ref().trim())
        .filter(|arg| !arg.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}
