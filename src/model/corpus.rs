use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One catalog entry: a title plus the four text attributes the vector
/// space is built from.
///
/// Every attribute is a plain `String` defaulting to empty — absent source
/// columns become `""` at load time, never `None`. The title is the item's
/// identity; its canonical (case-sensitive) form is what queries return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub director: String,
}

impl ItemRecord {
    pub fn new(title: impl Into<String>) -> Self {
        ItemRecord {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = genres.into();
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    /// The text the vectorizer sees: genres, overview, cast, director,
    /// whitespace-joined in that fixed order.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.genres, self.overview, self.cast, self.director
        )
    }
}

/// Drop records whose title was already seen, keeping the first occurrence.
///
/// Runs before row indices are assigned, so the surviving order is the
/// corpus order every downstream structure refers to. Comparison is
/// case-sensitive: "Heat" and "HEAT" are distinct canonical titles.
pub fn dedup_keep_first(items: Vec<ItemRecord>) -> Vec<ItemRecord> {
    let mut seen: IndexMap<String, ()> = IndexMap::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.title.clone(), ()).is_none() {
            out.push(item);
        }
    }
    out
}

/// Title → row lookup, with a case-folded secondary index.
///
/// Built once from the deduplicated catalog and never mutated. The primary
/// map is bijective with the item list; the folded map keeps the first
/// occurrence when two canonical titles collide after lowercasing.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    by_title: IndexMap<String, usize>,
    by_folded: IndexMap<String, usize>,
}

impl TitleIndex {
    pub fn build(items: &[ItemRecord]) -> Self {
        let mut by_title = IndexMap::with_capacity(items.len());
        let mut by_folded = IndexMap::with_capacity(items.len());
        for (row, item) in items.iter().enumerate() {
            by_title.insert(item.title.clone(), row);
            by_folded.entry(item.title.to_lowercase()).or_insert(row);
        }
        Self {
            by_title,
            by_folded,
        }
    }

    /// Resolve a title to its row: exact canonical match first, then the
    /// case-folded index.
    pub fn resolve(&self, title: &str) -> Option<usize> {
        if let Some(&row) = self.by_title.get(title) {
            return Some(row);
        }
        self.by_folded.get(&title.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}
