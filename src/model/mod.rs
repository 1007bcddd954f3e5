pub mod cluster;
pub mod corpus;
pub mod query;
pub mod similarity;
pub mod snapshot;
pub mod stopwords;
pub mod tfidf;
pub mod vocab;

use serde::{Deserialize, Serialize};
use tracing::info;

use self::cluster::{ClusterAssignment, KMeans, DEFAULT_MAX_ITER};
use self::corpus::{dedup_keep_first, ItemRecord, TitleIndex};
use self::similarity::SimilarityMatrix;
use self::stopwords::StopWordPolicy;
use self::tfidf::TfidfMatrix;
use self::vocab::{DfBounds, Vocabulary};

/// Build-time configuration for [`Model::build`].
///
/// The defaults mirror a catalog-browsing setup: English stop words, six
/// clusters, seed 42, ten recommendations per query, no document-frequency
/// pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    stop_words: StopWordPolicy,
    clusters: usize,
    seed: u64,
    default_top_k: usize,
    df_bounds: DfBounds,
    max_iter: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            stop_words: StopWordPolicy::English,
            clusters: 6,
            seed: 42,
            default_top_k: 10,
            df_bounds: DfBounds::default(),
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_words_english(mut self) -> Self {
        self.stop_words = StopWordPolicy::English;
        self
    }

    /// Use a caller-supplied stop-word list instead of the built-in one.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = StopWordPolicy::Custom(
            words.into_iter().map(|w| w.as_ref().to_string()).collect(),
        );
        self
    }

    pub fn without_stop_words(mut self) -> Self {
        self.stop_words = StopWordPolicy::Disabled;
        self
    }

    /// Number of K-Means clusters. Clamped to the item count at build time.
    pub fn with_clusters(mut self, k: usize) -> Self {
        self.clusters = k;
        self
    }

    /// Clustering seed; a fixed seed makes the whole model reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_default_top_k(mut self, k: usize) -> Self {
        self.default_top_k = k;
        self
    }

    /// Minimum document count for a term to enter the vocabulary.
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.df_bounds.min_df = min_df;
        self
    }

    /// Maximum document fraction for a term to stay in the vocabulary.
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.df_bounds.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    pub fn stop_words(&self) -> &StopWordPolicy {
        &self.stop_words
    }

    pub fn clusters(&self) -> usize {
        self.clusters
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub fn df_bounds(&self) -> DfBounds {
        self.df_bounds
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }
}

/// The built, immutable engine: catalog, vocabulary, document-term matrix,
/// pairwise similarity, and cluster assignment, plus the title index the
/// query layer resolves through.
///
/// A `Model` is a plain value — build one per corpus, share it by
/// reference, rebuild from scratch for a new corpus. Nothing in it mutates
/// after `build`, so the query phase needs no locking; swapping in a fresh
/// model is the caller's rebuild-then-swap.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) items: Vec<ItemRecord>,
    pub(crate) index: TitleIndex,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) matrix: TfidfMatrix,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) clusters: ClusterAssignment,
    pub(crate) config: ModelConfig,
}

impl Model {
    /// Run the full pipeline: keep-first dedup, title index, vocabulary,
    /// TF-IDF matrix, pairwise similarity, clustering.
    ///
    /// Building never fails. An empty corpus yields a valid model whose
    /// queries all miss; an oversized cluster count clamps to the item
    /// count.
    pub fn build(items: Vec<ItemRecord>, config: ModelConfig) -> Model {
        let items = dedup_keep_first(items);
        let index = TitleIndex::build(&items);

        let stop_words = config.stop_words().words();
        let vocabulary = Vocabulary::build(&items, &stop_words, config.df_bounds());
        let matrix = TfidfMatrix::build(&items, &vocabulary);
        let similarity = SimilarityMatrix::build(&matrix);
        let clusters = KMeans::new(config.clusters())
            .with_seed(config.seed())
            .with_max_iter(config.max_iter())
            .fit(&matrix);

        info!(
            items = items.len(),
            terms = vocabulary.len(),
            clusters = clusters.k(),
            "model built"
        );

        Model {
            items,
            index,
            vocabulary,
            matrix,
            similarity,
            clusters,
            config,
        }
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &TfidfMatrix {
        &self.matrix
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn clusters(&self) -> &ClusterAssignment {
        &self.clusters
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ItemRecord> {
        vec![
            ItemRecord::new("Inception")
                .with_genres("Sci-Fi Thriller")
                .with_overview("A thief enters dreams")
                .with_cast("DiCaprio")
                .with_director("Nolan"),
            ItemRecord::new("Interstellar")
                .with_genres("Sci-Fi Drama")
                .with_overview("Farmers leave a dying earth")
                .with_cast("McConaughey")
                .with_director("Nolan"),
            ItemRecord::new("Heat")
                .with_genres("Crime Thriller")
                .with_overview("A crew of thieves against a detective")
                .with_cast("Pacino")
                .with_director("Mann"),
            ItemRecord::new("Before Sunrise")
                .with_genres("Romance Drama")
                .with_overview("Two strangers talk through a night")
                .with_cast("Hawke Delpy")
                .with_director("Linklater"),
        ]
    }

    #[test]
    fn build_wires_every_structure_consistently() {
        let model = Model::build(catalog(), ModelConfig::default().with_clusters(2));
        assert_eq!(model.len(), 4);
        assert_eq!(model.matrix().len(), 4);
        assert_eq!(model.similarity().len(), 4);
        assert_eq!(model.clusters().len(), 4);
        assert_eq!(model.matrix().dims(), model.vocabulary().len());
        assert!(!model.vocabulary().is_empty());
    }

    #[test]
    fn duplicate_titles_collapse_before_indexing() {
        let mut items = catalog();
        items.push(ItemRecord::new("Heat").with_genres("Documentary"));
        let model = Model::build(items, ModelConfig::default());
        assert_eq!(model.len(), 4);
        // the first occurrence's text is the one vectorized
        assert_eq!(model.items()[2].genres, "Crime Thriller");
    }

    #[test]
    fn identical_corpus_and_seed_rebuild_identically() {
        let config = ModelConfig::default().with_clusters(2).with_seed(9);
        let a = Model::build(catalog(), config.clone());
        let b = Model::build(catalog(), config);
        let terms_a: Vec<&str> = a.vocabulary().terms().collect();
        let terms_b: Vec<&str> = b.vocabulary().terms().collect();
        assert_eq!(terms_a, terms_b);
        assert_eq!(a.matrix(), b.matrix());
        assert_eq!(a.similarity(), b.similarity());
        assert_eq!(a.clusters(), b.clusters());
    }

    #[test]
    fn empty_corpus_builds_a_consistent_empty_model() {
        let model = Model::build(Vec::new(), ModelConfig::default());
        assert!(model.is_empty());
        assert!(model.vocabulary().is_empty());
        assert!(model.matrix().is_empty());
        assert!(model.similarity().is_empty());
        assert!(model.clusters().is_empty());
    }

    #[test]
    fn cluster_count_clamps_to_catalog_size() {
        let model = Model::build(catalog(), ModelConfig::default().with_clusters(50));
        assert_eq!(model.clusters().k(), 4);
    }

    #[test]
    fn config_builder_composes() {
        let config = ModelConfig::new()
            .with_stop_words(["foo", "bar"])
            .with_clusters(3)
            .with_seed(7)
            .with_default_top_k(5)
            .with_min_df(2)
            .with_max_df(0.9)
            .with_max_iter(25);
        assert_eq!(config.clusters(), 3);
        assert_eq!(config.seed(), 7);
        assert_eq!(config.default_top_k(), 5);
        assert_eq!(config.df_bounds().min_df, 2);
        assert!((config.df_bounds().max_df - 0.9).abs() < 1e-12);
        assert_eq!(config.max_iter(), 25);
        assert!(matches!(config.stop_words(), StopWordPolicy::Custom(_)));
    }

    #[test]
    fn max_df_clamps_into_unit_range() {
        let config = ModelConfig::new().with_max_df(7.5);
        assert_eq!(config.df_bounds().max_df, 1.0);
    }

    #[test]
    fn stop_word_policy_shapes_the_vocabulary() {
        let items = vec![ItemRecord::new("A").with_overview("the ship and the storm")];
        let with = Model::build(items.clone(), ModelConfig::default());
        let without = Model::build(items, ModelConfig::default().without_stop_words());
        assert!(with.vocabulary().dim_of("the").is_none());
        assert!(without.vocabulary().dim_of("the").is_some());
    }
}
