/// This crate is a content-similarity and clustering engine for movie catalogs.
pub mod error;
pub mod model;

/// Model
/// The top-level value of this crate: the immutable result of one build over
/// a deduplicated catalog. It holds the vocabulary, the unit-normalized
/// TF-IDF document-term matrix, the full pairwise similarity matrix, the
/// K-Means cluster assignment, and the title index the query layer resolves
/// through.
///
/// Build once per corpus with `Model::build`, query it freely from any
/// thread, and rebuild from scratch when the corpus changes. Because a
/// `Model` is a plain value with no global state, several can coexist (e.g.
/// one per test, or old-and-new during a rebuild-then-swap).
///
/// # Queries
/// - `similar` / `similar_with_limit`: ranked most-similar titles
/// - `cluster_of`: an item's cluster label and cluster-mates
/// - `pair_similarity`: the cosine score of two named items
///
/// # Serialization
/// Not directly; detach a `ModelSnapshot` with `Model::snapshot`.
pub use model::Model;

/// Model Configuration
/// Builder-style knobs for `Model::build`: stop-word policy, cluster count,
/// clustering seed, default top-K, optional document-frequency pruning
/// bounds, and the clustering iteration cap.
pub use model::ModelConfig;

/// Item Record
/// One catalog entry: the unique title plus the four text attributes
/// (genres, overview, cast, director) the vector space is built from. All
/// attributes default to the empty string, never null.
pub use model::corpus::ItemRecord;

/// Search Hits and Hit Entry structures
/// Data structures for ranked similarity results.
/// - `Hits`: an ordered list of results, best first
/// - `HitEntry`: a single result, carrying the canonical title and its score
pub use model::query::{HitEntry, Hits};

/// Cluster View
/// The answer to a cluster query: the item's label and its cluster-mates in
/// corpus order (the item itself excluded).
pub use model::query::ClusterView;

/// K-Means Cluster Engine
/// Seeded centroid-based clustering over the document-term matrix, with
/// k-means++ initialization and a bounded iteration count. Normally driven
/// by `Model::build`; exposed for callers that want to re-cluster an
/// existing matrix with different parameters.
pub use model::cluster::{ClusterAssignment, KMeans};

/// Vocabulary
/// The ordered term → dimension map derived from the corpus at build time,
/// with per-term document frequencies and smoothed IDF weights. Fixed after
/// the build; unknown terms simply contribute nothing.
pub use model::vocab::{DfBounds, Vocabulary};

/// Document-Term Matrix
/// One unit-normalized sparse TF-IDF row per item, in corpus order. Shared,
/// read-only, by the similarity and cluster engines.
pub use model::tfidf::{SparseRow, TfidfMatrix};

/// Similarity Matrix
/// The full pairwise cosine-similarity matrix with row, pair, and
/// deterministic top-K queries.
pub use model::similarity::SimilarityMatrix;

/// Stop Words
/// The stop-word policy (built-in English list, custom list, or disabled)
/// and the materialized lookup set used during vocabulary construction.
pub use model::stopwords::{StopWordPolicy, StopWords};

/// Model Snapshot
/// A reference-free serializable twin of `Model` with CBOR encode/decode
/// helpers; `into_model` reconstitutes a queryable model.
pub use model::snapshot::ModelSnapshot;

/// Error taxonomy
/// `TitleNotFound` is the expected structured miss for unresolvable titles;
/// `Snapshot` wraps codec failures. The engine itself never panics on user
/// input.
pub use error::{ModelError, Result};
