//! Vector storage backends
//!
//! A store holds one named collection at a time. Creating the collection is
//! destructive: [`VectorStore::reset_collection`] drops every entry of the
//! previous load, so the store never mixes two load generations.
//!
//! # Storage Model
//!
//! Each stored item is an [`IndexEntry`]:
//! - id: position of the document in its load (0..N-1)
//! - vector: the document embedding
//! - payload: the original text
//!
//! # Usage
//!
//! ```ignore
//! use nanguide_lib::store::{Distance, MemoryStore, VectorStore};
//!
//! let mut store = MemoryStore::new();
//! store.reset_collection("documents", 384, Distance::Cosine)?;
//!
//! // Insert entries in bulk
//! store.upsert(entries)?;
//!
//! // Search by vector similarity
//! let results = store.query(&query_embedding, 5)?;
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::embed::Embedding;
use crate::Result;

/// Similarity metric of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

impl Distance {
    /// Score two vectors of equal length. Higher is always more similar;
    /// Euclid scores are negated distances.
    #[must_use]
    pub fn score(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Distance::Cosine => cosine_similarity(a, b),
            Distance::Dot => dot(a, b),
            Distance::Euclid => -a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt(),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Distance::Cosine => "cosine",
            Distance::Dot => "dot",
            Distance::Euclid => "euclid",
        };
        f.write_str(name)
    }
}

/// Data stored alongside a vector
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Payload {
    /// The document text
    pub text: String,
}

/// One stored document: id, embedding, and payload
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub id: u64,
    pub vector: Embedding,
    pub payload: Payload,
}

/// A search result with similarity score
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    /// Id of the matched entry
    pub id: u64,
    /// The matched payload
    pub payload: Payload,
    /// Similarity score (higher is more similar)
    /// For cosine similarity: -1.0 to 1.0
    pub score: f32,
}

// A point is "greater" when it ranks earlier: higher score, then lower id.
impl Ord for ScoredPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for ScoredPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoredPoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredPoint {}

/// Description of the current collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub dimension: usize,
    pub distance: Distance,
    /// Number of stored entries
    pub points: usize,
}

/// Trait for vector storage backends
pub trait VectorStore: Send + Sync {
    /// (Re)create an empty collection, discarding all prior contents.
    fn reset_collection(&mut self, name: &str, dimension: usize, distance: Distance) -> Result<()>;

    /// Insert or replace entries by id
    ///
    /// All-or-nothing: if any entry is rejected, nothing is written.
    fn upsert(&mut self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Search for similar entries
    ///
    /// # Arguments
    /// * `vector` - The query vector
    /// * `k` - Maximum number of results to return
    ///
    /// # Returns
    /// Top-k results sorted by score (highest first), ties broken by ascending id
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredPoint>>;

    /// The current collection, if one has been created
    fn collection(&self) -> Option<CollectionInfo>;

    /// Get total number of stored entries
    fn len(&self) -> usize;

    /// Check if store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction, and 0 when
/// either vector has zero length.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let norm_a = dot(a, a).sqrt();
    let norm_b = dot(b, b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot(a, b) / (norm_a * norm_b)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

mod memory;

pub use memory::*;
