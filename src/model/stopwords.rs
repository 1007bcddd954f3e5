use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Stop-word policy carried by the model configuration.
///
/// The policy is what gets serialized with a snapshot; the derived
/// [`StopWords`] set is rebuilt from it on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopWordPolicy {
    /// The built-in English function-word list.
    #[default]
    English,
    /// A caller-supplied list (matched after lowercasing).
    Custom(Vec<String>),
    /// No filtering at all.
    Disabled,
}

impl StopWordPolicy {
    /// Materialize the lookup set for this policy.
    pub fn words(&self) -> StopWords {
        match self {
            StopWordPolicy::English => StopWords::english(),
            StopWordPolicy::Custom(list) => StopWords::new(list),
            StopWordPolicy::Disabled => StopWords::none(),
        }
    }
}

/// Set of words discarded during vocabulary construction.
///
/// Matching is case-insensitive: the set stores lowercase forms and the
/// tokenizer lowercases before lookup.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        Self { words }
    }

    /// The built-in English list.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// An empty set; every token passes.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Common English function words, the usual NLP stop list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "her", "hers", "herself", "it", "its", "itself", "they", "them",
    "their", "theirs", "themselves",
    // question words
    "what", "which", "who", "whom", "whose", "why", "when", "where", "how",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among",
    "around", "at", "before", "behind", "below", "beneath", "beside",
    "between", "beyond", "by", "down", "during", "for", "from", "in",
    "inside", "into", "near", "of", "off", "on", "onto", "out", "outside",
    "over", "through", "throughout", "to", "toward", "under", "underneath",
    "until", "up", "upon", "with", "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "or", "since", "so", "than", "that",
    "though", "unless", "while",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "would", "should",
    "could", "ought", "can", "may", "might", "must", "will", "shall",
    // determiners and common adverbs
    "all", "any", "both", "each", "every", "few", "more", "most", "much",
    "neither", "no", "none", "not", "one", "other", "same", "several",
    "some", "such", "very", "too", "only", "own", "then", "there", "these",
    "this", "those", "just", "now", "here", "again", "also",
];
