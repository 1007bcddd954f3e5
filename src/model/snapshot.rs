use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::cluster::ClusterAssignment;
use super::corpus::{ItemRecord, TitleIndex};
use super::similarity::SimilarityMatrix;
use super::tfidf::TfidfMatrix;
use super::vocab::Vocabulary;
use super::{Model, ModelConfig};

/// A reference-free, serializable twin of [`Model`].
///
/// Everything derivable is stored except the title index, which is cheap to
/// rebuild and fully determined by the item list. CBOR is the on-disk
/// encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub items: Vec<ItemRecord>,
    pub vocabulary: Vocabulary,
    pub matrix: TfidfMatrix,
    pub similarity: SimilarityMatrix,
    pub clusters: ClusterAssignment,
    pub config: ModelConfig,
}

impl ModelSnapshot {
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }

    /// Reconstitute a queryable model, rebuilding the title index.
    pub fn into_model(self) -> Model {
        let index = TitleIndex::build(&self.items);
        Model {
            items: self.items,
            index,
            vocabulary: self.vocabulary,
            matrix: self.matrix,
            similarity: self.similarity,
            clusters: self.clusters,
            config: self.config,
        }
    }
}

impl Model {
    /// Detach a snapshot of the built structures.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            items: self.items.clone(),
            vocabulary: self.vocabulary.clone(),
            matrix: self.matrix.clone(),
            similarity: self.similarity.clone(),
            clusters: self.clusters.clone(),
            config: self.config.clone(),
        }
    }
}
