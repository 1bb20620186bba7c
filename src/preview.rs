use serde::Serialize;

use crate::sampler::SampleSelection;
use crate::search::CandidatePool;

pub const PREVIEW_TITLE: &str = "Choose your gif...";

/// Kind of content a preview item displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Image,
}

/// One entry of the preview list handed to the host surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewItem {
    /// Candidate id, reported back when the item is chosen
    pub id: String,
    pub kind: PreviewKind,
    /// Preview-resolution asset url
    pub display_ref: String,
}

/// What the previewer returns to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    pub items: Vec<PreviewItem>,
}

impl Preview {
    pub fn new(items: Vec<PreviewItem>) -> Self {
        Self {
            title: PREVIEW_TITLE.to_string(),
            items,
        }
    }
}

/// Map sampled candidates to preview items, in draw order.
///
/// Panics if `selection` holds an index outside `pool`; selections are only
/// valid for the pool they were sampled from.
pub fn assemble(pool: &CandidatePool, selection: &SampleSelection) -> Vec<PreviewItem> {
    selection
        .indices()
        .iter()
        .map(|&index| &pool[index])
        .map(|candidate| PreviewItem {
            id: candidate.id.clone(),
            kind: PreviewKind::Image,
            display_ref: candidate.preview_url.clone(),
        })
        .collect()
}
