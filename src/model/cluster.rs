use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tfidf::{SparseRow, TfidfMatrix};

/// Iteration cap guaranteeing termination even when assignments oscillate.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Seeded K-Means over the document-term matrix.
///
/// Centroids are initialized with k-means++ driven by a `StdRng` seeded from
/// `seed`, so a fixed seed reproduces the assignment exactly. Lloyd
/// iterations alternate a rayon-parallel nearest-centroid pass (Euclidean
/// distance, ties to the lowest centroid index) with a sequential centroid
/// mean recomputation, and stop when labels settle or `max_iter` is hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMeans {
    k: usize,
    seed: u64,
    max_iter: usize,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        KMeans {
            k,
            seed: 42,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Partition every row into one of `min(k, N)` clusters (a requested
    /// `k` of zero is treated as one). The result is total: each row gets
    /// exactly one label in `[0, k_eff)`.
    pub fn fit(&self, matrix: &TfidfMatrix) -> ClusterAssignment {
        let n = matrix.len();
        if n == 0 {
            return ClusterAssignment::default();
        }
        let k = self.k.clamp(1, n);
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut centroids = seed_centroids(matrix, k, &mut rng);
        let mut labels: Vec<usize> = vec![usize::MAX; n];
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            iterations = iter + 1;
            let norms: Vec<f64> = centroids
                .iter()
                .map(|c| c.iter().map(|x| x * x).sum())
                .collect();
            let next: Vec<usize> = matrix
                .rows()
                .par_iter()
                .map(|row| nearest_centroid(row, &centroids, &norms))
                .collect();
            if next == labels {
                break;
            }
            labels = next;
            update_centroids(&mut centroids, matrix, &labels);
        }

        debug!(k, iterations, rows = n, "k-means assignment settled");
        ClusterAssignment { labels, k }
    }
}

/// k-means++: the first centroid is a uniform pick, each further one a pick
/// weighted by squared distance to the nearest centroid chosen so far.
fn seed_centroids(matrix: &TfidfMatrix, k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let dims = matrix.dims();
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);

    let first = rng.random_range(0..n);
    centroids.push(to_dense(matrix.row(first), dims));
    let mut dist: Vec<f64> = (0..n)
        .map(|i| squared_distance(matrix.row(i), &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = dist.iter().sum();
        let pick = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut idx = n - 1;
            for (i, &d) in dist.iter().enumerate() {
                if target < d {
                    idx = i;
                    break;
                }
                target -= d;
            }
            idx
        } else {
            // every remaining row coincides with a centroid (duplicates or
            // zero rows); any pick is as good as another
            rng.random_range(0..n)
        };
        let chosen = to_dense(matrix.row(pick), dims);
        for (i, d) in dist.iter_mut().enumerate() {
            let nd = squared_distance(matrix.row(i), &chosen);
            if nd < *d {
                *d = nd;
            }
        }
        centroids.push(chosen);
    }
    centroids
}

fn to_dense(row: &SparseRow, dims: usize) -> Vec<f64> {
    let mut dense = vec![0.0; dims];
    row.add_into(&mut dense);
    dense
}

fn squared_distance(row: &SparseRow, centroid: &[f64]) -> f64 {
    let row_norm = row.dot(row);
    let centroid_norm: f64 = centroid.iter().map(|x| x * x).sum();
    (row_norm + centroid_norm - 2.0 * row.dot_dense(centroid)).max(0.0)
}

/// ‖x‖² is constant per row, so the argmin over centroids only needs
/// ‖c‖² − 2·x·c. Strict comparison keeps the lowest index on ties.
fn nearest_centroid(row: &SparseRow, centroids: &[Vec<f64>], norms: &[f64]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let d = norms[j] - 2.0 * row.dot_dense(centroid);
        if d < best_d {
            best_d = d;
            best = j;
        }
    }
    best
}

/// Recompute each centroid as the mean of its members. A cluster that lost
/// all members keeps its previous centroid.
fn update_centroids(centroids: &mut [Vec<f64>], matrix: &TfidfMatrix, labels: &[usize]) {
    let dims = matrix.dims();
    let k = centroids.len();
    let mut sums = vec![vec![0.0; dims]; k];
    let mut counts = vec![0usize; k];
    for (i, &label) in labels.iter().enumerate() {
        matrix.row(i).add_into(&mut sums[label]);
        counts[label] += 1;
    }
    for (j, sum) in sums.into_iter().enumerate() {
        if counts[j] == 0 {
            continue;
        }
        let inv = 1.0 / counts[j] as f64;
        centroids[j] = sum.into_iter().map(|v| v * inv).collect();
    }
}

/// One clustering run's output: a label in `[0, k)` per row.
///
/// Label identity is arbitrary across runs with different seeds; only
/// co-membership is meaningful. Within a run the mapping is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    k: usize,
}

impl ClusterAssignment {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Effective cluster count (the requested `k` after clamping).
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn label_of(&self, row: usize) -> usize {
        self.labels[row]
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Rows carrying `label`, in corpus order.
    pub fn members_of(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::corpus::ItemRecord;
    use crate::model::stopwords::StopWords;
    use crate::model::vocab::{DfBounds, Vocabulary};

    fn matrix_for(items: &[ItemRecord]) -> TfidfMatrix {
        let vocab = Vocabulary::build(items, &StopWords::none(), DfBounds::default());
        TfidfMatrix::build(items, &vocab)
    }

    fn two_groups() -> TfidfMatrix {
        matrix_for(&[
            ItemRecord::new("A")
                .with_genres("Action")
                .with_director("Mann"),
            ItemRecord::new("B")
                .with_genres("Action")
                .with_director("Mann"),
            ItemRecord::new("C")
                .with_genres("Drama Romance")
                .with_director("Lee"),
            ItemRecord::new("D")
                .with_genres("Drama Romance")
                .with_director("Lee"),
        ])
    }

    #[test]
    fn assignment_is_total_and_in_range() {
        let matrix = two_groups();
        let assignment = KMeans::new(2).fit(&matrix);
        assert_eq!(assignment.len(), matrix.len());
        assert_eq!(assignment.k(), 2);
        for &label in assignment.labels() {
            assert!(label < assignment.k());
        }
    }

    #[test]
    fn separates_well_separated_groups() {
        let matrix = two_groups();
        for seed in 0..10 {
            let assignment = KMeans::new(2).with_seed(seed).fit(&matrix);
            assert_eq!(assignment.label_of(0), assignment.label_of(1), "seed {seed}");
            assert_eq!(assignment.label_of(2), assignment.label_of(3), "seed {seed}");
            assert_ne!(assignment.label_of(0), assignment.label_of(2), "seed {seed}");
        }
    }

    #[test]
    fn oversized_k_clamps_to_item_count() {
        let matrix = matrix_for(&[
            ItemRecord::new("A").with_genres("Action"),
            ItemRecord::new("B").with_genres("Drama"),
            ItemRecord::new("C").with_genres("Horror"),
        ]);
        let assignment = KMeans::new(10).fit(&matrix);
        assert_eq!(assignment.k(), 3);
        // distinct rows with k == N end up each in their own cluster
        let mut labels: Vec<usize> = assignment.labels().to_vec();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn zero_k_is_treated_as_one() {
        let matrix = two_groups();
        let assignment = KMeans::new(0).fit(&matrix);
        assert_eq!(assignment.k(), 1);
        assert!(assignment.labels().iter().all(|&l| l == 0));
    }

    #[test]
    fn empty_matrix_yields_empty_assignment() {
        let assignment = KMeans::new(4).fit(&matrix_for(&[]));
        assert!(assignment.is_empty());
        assert_eq!(assignment.k(), 0);
    }

    #[test]
    fn fixed_seed_reproduces_assignment() {
        let matrix = two_groups();
        let a = KMeans::new(2).with_seed(7).fit(&matrix);
        let b = KMeans::new(2).with_seed(7).fit(&matrix);
        assert_eq!(a, b);
    }

    #[test]
    fn iteration_bound_still_yields_total_assignment() {
        let matrix = two_groups();
        let assignment = KMeans::new(2).with_max_iter(1).fit(&matrix);
        assert_eq!(assignment.len(), matrix.len());
        for &label in assignment.labels() {
            assert!(label < assignment.k());
        }
    }

    #[test]
    fn members_preserve_corpus_order() {
        let matrix = two_groups();
        let assignment = KMeans::new(2).with_seed(3).fit(&matrix);
        let label = assignment.label_of(2);
        let members = assignment.members_of(label);
        assert_eq!(members, vec![2, 3]);
    }

    #[test]
    fn zero_rows_cluster_without_nan() {
        let matrix = matrix_for(&[
            ItemRecord::new("A"),
            ItemRecord::new("B"),
            ItemRecord::new("C").with_genres("Action"),
        ]);
        let assignment = KMeans::new(2).fit(&matrix);
        assert_eq!(assignment.len(), 3);
        // the two all-empty items sit at the origin together
        assert_eq!(assignment.label_of(0), assignment.label_of(1));
    }
}
