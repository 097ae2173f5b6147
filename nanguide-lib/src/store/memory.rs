use std::collections::{BTreeMap, BinaryHeap};

use tracing::debug;

use crate::store::{CollectionInfo, Distance, IndexEntry, ScoredPoint, VectorStore};
use crate::{Error, Result};

/// In-process vector store.
///
/// Uses brute-force similarity search over a single collection. Suitable for
/// small document sets; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: Option<Collection>,
}

#[derive(Debug)]
struct Collection {
    name: String,
    dimension: usize,
    distance: Distance,
    entries: BTreeMap<u64, IndexEntry>,
}

impl MemoryStore {
    /// Create a new store with no collection.
    #[must_use]
    pub fn new() -> Self {
        Self { collection: None }
    }
}

impl VectorStore for MemoryStore {
    fn reset_collection(&mut self, name: &str, dimension: usize, distance: Distance) -> Result<()> {
        if dimension == 0 {
            return Err(Error::InvalidInput(
                "collection dimension must be greater than zero".to_string(),
            ));
        }

        if let Some(old) = &self.collection {
            debug!(name = %old.name, points = old.entries.len(), "dropping collection");
        }

        self.collection = Some(Collection {
            name: name.to_string(),
            dimension,
            distance,
            entries: BTreeMap::new(),
        });
        Ok(())
    }

    fn upsert(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        let collection = self.collection.as_mut().ok_or(Error::StoreNotInitialized)?;

        // validate the whole batch before touching the collection
        for entry in &entries {
            if entry.vector.len() != collection.dimension {
                return Err(Error::StoreWrite(format!(
                    "entry {} has dimension {}, collection {:?} expects {}",
                    entry.id,
                    entry.vector.len(),
                    collection.name,
                    collection.dimension
                )));
            }
            if entry.vector.iter().any(|v| !v.is_finite()) {
                return Err(Error::StoreWrite(format!(
                    "entry {} contains non-finite values",
                    entry.id
                )));
            }
        }

        for entry in entries {
            collection.entries.insert(entry.id, entry);
        }
        Ok(())
    }

    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredPoint>> {
        let collection = self.collection.as_ref().ok_or(Error::StoreNotInitialized)?;

        if vector.len() != collection.dimension {
            return Err(Error::InvalidInput(format!(
                "query vector has dimension {}, collection {:?} expects {}",
                vector.len(),
                collection.name,
                collection.dimension
            )));
        }

        let mut results = BinaryHeap::with_capacity(collection.entries.len());

        for entry in collection.entries.values() {
            results.push(ScoredPoint {
                id: entry.id,
                payload: entry.payload.clone(),
                score: collection.distance.score(vector, &entry.vector),
            });
        }

        Ok(results
            .into_sorted_vec()
            .into_iter()
            .rev()
            .take(k)
            .collect())
    }

    fn collection(&self) -> Option<CollectionInfo> {
        self.collection.as_ref().map(|c| CollectionInfo {
            name: c.name.clone(),
            dimension: c.dimension,
            distance: c.distance,
            points: c.entries.len(),
        })
    }

    fn len(&self) -> usize {
        self.collection.as_ref().map_or(0, |c| c.entries.len())
    }
}
