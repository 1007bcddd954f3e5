use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tfidf::TfidfMatrix;

/// The full pairwise similarity matrix: dense, square, symmetric, cells in
/// [0, 1].
///
/// Cell (i, j) is the dot product of rows i and j of the document-term
/// matrix. Rows arrive unit-normalized from the vectorizer, so the dot
/// product *is* cosine similarity — that precondition is asserted in debug
/// builds instead of re-normalizing on every build. Zero-norm rows score
/// 0.0 against everything, themselves included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all N² pairwise scores, one rayon task per row. Each task
    /// writes a disjoint row, so the result is deterministic regardless of
    /// thread count.
    pub fn build(matrix: &TfidfMatrix) -> Self {
        #[cfg(debug_assertions)]
        for row in matrix.rows() {
            let norm = row.norm();
            debug_assert!(
                row.is_zero() || (norm - 1.0).abs() < 1e-9,
                "similarity engine fed non-normalized row (norm = {norm})"
            );
        }

        let n = matrix.len();
        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row_i = matrix.row(i);
                (0..n)
                    .map(|j| row_i.dot(matrix.row(j)).min(1.0))
                    .collect()
            })
            .collect();

        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            cells.extend(row);
        }
        SimilarityMatrix { n, cells }
    }

    /// Number of items (the matrix is `len × len`).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    #[inline]
    pub fn pair(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// The K most similar rows to `i`: scores descending, ties broken by
    /// ascending row index, `i` itself excluded. Returns at most
    /// `min(k, N − 1)` entries; with no other rows the result is empty.
    pub fn top_k(&self, i: usize, k: usize) -> Vec<(usize, f64)> {
        if self.n <= 1 || k == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(usize, f64)> = self
            .row(i)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(k);
        scored
    }
}
