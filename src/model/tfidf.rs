use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::corpus::ItemRecord;
use super::vocab::{tokenize, Vocabulary};

/// One document's TF-IDF vector in sparse form: parallel dimension/weight
/// arrays, sorted by dimension.
///
/// Rows are scaled to unit Euclidean norm at construction. A document whose
/// text contributes no vocabulary terms is the zero row — no entries, norm
/// zero, and it is treated as already normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseRow {
    dims: Vec<u32>,
    weights: Vec<f64>,
}

impl SparseRow {
    fn from_sorted(pairs: BTreeMap<u32, f64>) -> Self {
        let mut dims = Vec::with_capacity(pairs.len());
        let mut weights = Vec::with_capacity(pairs.len());
        for (dim, weight) in pairs {
            dims.push(dim);
            weights.push(weight);
        }
        SparseRow { dims, weights }
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.dims.len()
    }

    pub fn is_zero(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.dims
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }

    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit norm. The zero row stays the zero row.
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for w in &mut self.weights {
                *w /= norm;
            }
        }
    }

    /// Dot product of two sorted sparse rows, walking both index lists in
    /// lockstep.
    pub fn dot(&self, other: &SparseRow) -> f64 {
        let mut a = 0;
        let mut b = 0;
        let mut sum = 0.0;
        while a < self.dims.len() && b < other.dims.len() {
            match self.dims[a].cmp(&other.dims[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    sum += self.weights[a] * other.weights[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Dot product against a dense vector (centroid side of clustering).
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter()
            .map(|(dim, w)| w * dense.get(dim as usize).copied().unwrap_or(0.0))
            .sum()
    }

    /// Accumulate this row into a dense buffer.
    pub fn add_into(&self, acc: &mut [f64]) {
        for (dim, w) in self.iter() {
            acc[dim as usize] += w;
        }
    }
}

/// The document-term matrix: one unit-normalized sparse TF-IDF row per
/// catalog item, in corpus order. Immutable once built; a new corpus means
/// a full rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfMatrix {
    rows: Vec<SparseRow>,
    dims: usize,
}

impl TfidfMatrix {
    /// Vectorize the catalog against a fixed vocabulary. Rows are
    /// independent, so construction fans out across the rayon pool.
    pub fn build(items: &[ItemRecord], vocabulary: &Vocabulary) -> Self {
        let rows: Vec<SparseRow> = items
            .par_iter()
            .map(|item| Self::build_row(&item.combined_text(), vocabulary))
            .collect();
        TfidfMatrix {
            rows,
            dims: vocabulary.len(),
        }
    }

    /// weight(t, d) = count(t in d) × idf(t), then the row is scaled to
    /// unit norm. Tokens outside the vocabulary contribute nothing.
    fn build_row(text: &str, vocabulary: &Vocabulary) -> SparseRow {
        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(dim) = vocabulary.dim_of(&token) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        for (dim, count) in &mut counts {
            *count *= vocabulary.idf(*dim);
        }
        let mut row = SparseRow::from_sorted(counts);
        row.normalize();
        row
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vocabulary size, i.e. the column count.
    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn row(&self, i: usize) -> &SparseRow {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }
}
