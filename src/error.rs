use thiserror::Error;

/// Errors surfaced by the query layer and the snapshot codec.
///
/// A miss on a title lookup is an expected, frequent condition (user typos),
/// so it is a structured variant rather than a panic. Build-time
/// degeneracies (empty catalog, oversized cluster count, zero-norm rows) are
/// handled internally and never reach this enum.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The queried title does not resolve, even through the case-folded index.
    #[error("title not found: {title:?}")]
    TitleNotFound { title: String },

    /// Snapshot encode/decode failure.
    #[error("snapshot codec error: {0}")]
    Snapshot(#[from] serde_cbor::Error),
}

impl ModelError {
    pub(crate) fn not_found(title: &str) -> Self {
        ModelError::TitleNotFound {
            title: title.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
