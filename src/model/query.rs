use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

use super::Model;

/// A single ranked result: the canonical title and its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    pub title: String,
    pub score: f64,
}

/// Ranked similarity results, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|hit| hit.title.as_str())
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.score, hit.title)?;
        }
        Ok(())
    }
}

/// An item's cluster: the label plus the other members, in corpus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterView {
    pub label: usize,
    pub members: Vec<String>,
}

/// The query layer. All operations are pure reads over the built
/// structures; an unresolvable title comes back as
/// [`ModelError::TitleNotFound`], never a panic.
impl Model {
    fn resolve(&self, title: &str) -> Result<usize> {
        self.index
            .resolve(title)
            .ok_or_else(|| ModelError::not_found(title))
    }

    /// The `default_top_k` most similar items to `title`.
    pub fn similar(&self, title: &str) -> Result<Hits> {
        self.similar_with_limit(title, self.config.default_top_k())
    }

    /// The `k` most similar items to `title` (score descending, ties by
    /// corpus order, the item itself excluded).
    pub fn similar_with_limit(&self, title: &str, k: usize) -> Result<Hits> {
        let row = self.resolve(title)?;
        let list = self
            .similarity
            .top_k(row, k)
            .into_iter()
            .map(|(j, score)| HitEntry {
                title: self.items[j].title.clone(),
                score,
            })
            .collect();
        Ok(Hits { list })
    }

    /// The item's cluster label and its cluster-mates.
    pub fn cluster_of(&self, title: &str) -> Result<ClusterView> {
        let row = self.resolve(title)?;
        let label = self.clusters.label_of(row);
        let members = self
            .clusters
            .members_of(label)
            .into_iter()
            .filter(|&j| j != row)
            .map(|j| self.items[j].title.clone())
            .collect();
        Ok(ClusterView { label, members })
    }

    /// Cosine similarity between two named items, in [0, 1].
    pub fn pair_similarity(&self, title_a: &str, title_b: &str) -> Result<f64> {
        let a = self.resolve(title_a)?;
        let b = self.resolve(title_b)?;
        Ok(self.similarity.pair(a, b))
    }
}
