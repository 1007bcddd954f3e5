use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::corpus::ItemRecord;
use super::stopwords::StopWords;

/// Split text into vocabulary tokens: lowercase, maximal alphanumeric runs,
/// single-character tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Optional document-frequency pruning bounds.
///
/// `min_df` is an absolute document count, `max_df` a fraction of the
/// corpus. The defaults (1 and 1.0) keep everything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DfBounds {
    pub min_df: usize,
    pub max_df: f64,
}

impl Default for DfBounds {
    fn default() -> Self {
        DfBounds {
            min_df: 1,
            max_df: 1.0,
        }
    }
}

impl DfBounds {
    fn keeps(&self, df: usize, doc_count: usize) -> bool {
        df >= self.min_df && df as f64 <= self.max_df * doc_count as f64
    }
}

/// The corpus vocabulary: an ordered term → dimension map with per-term
/// document frequencies and the smoothed IDF weights derived from them.
///
/// Terms are inserted in alphabetical order, so dimension assignment is
/// deterministic for a fixed corpus regardless of hash iteration order.
/// The vocabulary is fixed once built; text containing unknown terms simply
/// contributes nothing for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexMap<String, u32>,
    doc_freq: Vec<u32>,
    idf: Vec<f64>,
    doc_count: usize,
}

impl Vocabulary {
    /// Collect terms across the catalog, drop stop words, prune by the
    /// document-frequency bounds, and compute IDF.
    ///
    /// idf(t) = ln((1 + N) / (1 + df(t))) + 1 — smoothed, so a term present
    /// in every document still weighs 1.0 and nothing divides by zero.
    pub fn build(items: &[ItemRecord], stop_words: &StopWords, bounds: DfBounds) -> Self {
        let doc_count = items.len();

        // BTreeMap gives the alphabetical dimension order for free.
        let mut df: BTreeMap<String, u32> = BTreeMap::new();
        for item in items {
            let mut seen: HashSet<String> = HashSet::new();
            for token in tokenize(&item.combined_text()) {
                if stop_words.contains(&token) {
                    continue;
                }
                if seen.insert(token.clone()) {
                    *df.entry(token).or_insert(0) += 1;
                }
            }
        }

        let mut terms = IndexMap::new();
        let mut doc_freq = Vec::new();
        for (term, count) in df {
            if !bounds.keeps(count as usize, doc_count) {
                continue;
            }
            terms.insert(term, doc_freq.len() as u32);
            doc_freq.push(count);
        }

        let idf = doc_freq
            .iter()
            .map(|&dfc| ((1.0 + doc_count as f64) / (1.0 + f64::from(dfc))).ln() + 1.0)
            .collect();

        Self {
            terms,
            doc_freq,
            idf,
            doc_count,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of documents the vocabulary was built from.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    #[inline]
    pub fn dim_of(&self, term: &str) -> Option<u32> {
        self.terms.get(term).copied()
    }

    pub fn term(&self, dim: u32) -> Option<&str> {
        self.terms
            .get_index(dim as usize)
            .map(|(term, _)| term.as_str())
    }

    pub fn doc_freq(&self, dim: u32) -> u32 {
        self.doc_freq.get(dim as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn idf(&self, dim: u32) -> f64 {
        self.idf.get(dim as usize).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }
}
