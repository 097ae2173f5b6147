//! Document loading and retrieval
//!
//! Combines an embedder and a store: [`Retriever::load`] encodes a document
//! set into a fresh collection, [`Retriever::retrieve`] returns the texts
//! nearest to a query.
//!
//! # Usage
//!
//! ```ignore
//! use nanguide_lib::{corpus, retrieve::Retriever};
//!
//! let mut retriever = Retriever::new(embedder, store);
//! retriever.load(&corpus::NAN_GUIDE)?;
//! let texts = retriever.retrieve("น้ำตกที่น่านมีที่ไหนบ้าง", 5)?;
//! ```

use tracing::{debug, info};

use crate::config::{DEFAULT_COLLECTION, DEFAULT_TOP_K};
use crate::embed::{check_dimensions, Embedder};
use crate::store::{Distance, IndexEntry, Payload, ScoredPoint, VectorStore};
use crate::{Error, Result};

/// Number of documents retrieved when no `k` is given
pub const DEFAULT_K: usize = DEFAULT_TOP_K;

/// Embeds queries and documents and looks them up in a vector store.
pub struct Retriever<E: Embedder, S: VectorStore> {
    embedder: E,
    store: S,
    collection: String,
}

impl<E: Embedder, S: VectorStore> Retriever<E, S> {
    /// Create a retriever writing to the default `documents` collection.
    #[must_use]
    pub fn new(embedder: E, store: S) -> Self {
        Self {
            embedder,
            store,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Use `name` for the collection created by [`load`](Self::load).
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    /// Replace the store contents with `documents`.
    ///
    /// Documents get ids `0..N` in the given order. All documents are encoded
    /// before the collection is reset, so an embedding failure leaves the
    /// previous load in place. Returns the number of documents stored.
    pub fn load<T: AsRef<str>>(&mut self, documents: &[T]) -> Result<usize> {
        let texts: Vec<&str> = documents.iter().map(AsRef::as_ref).collect();
        let dimension = self.embedder.dimension();

        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder.encode(&texts)?
        };

        if vectors.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, model returned {}",
                texts.len(),
                vectors.len()
            )));
        }
        check_dimensions(&vectors, dimension)?;

        let entries: Vec<IndexEntry> = texts
            .iter()
            .zip(vectors)
            .enumerate()
            .map(|(id, (text, vector))| IndexEntry {
                id: id as u64,
                vector,
                payload: Payload {
                    text: (*text).to_string(),
                },
            })
            .collect();

        self.store
            .reset_collection(&self.collection, dimension, Distance::Cosine)?;
        self.store.upsert(entries)?;

        info!(
            collection = %self.collection,
            documents = texts.len(),
            model = self.embedder.model_name(),
            "loaded documents"
        );
        Ok(texts.len())
    }

    /// Top-`k` entries for `query`, highest score first.
    pub fn search(&mut self, query: &str, k: usize) -> Result<Vec<ScoredPoint>> {
        let query_embedding = self.embedder.encode_query(query)?;
        let results = self.store.query(&query_embedding, k)?;

        debug!(
            k,
            hits = results.len(),
            top_score = results.first().map(|r| r.score),
            "retrieved"
        );
        Ok(results)
    }

    /// Texts of the top-`k` entries for `query`, in rank order, scores dropped.
    pub fn retrieve(&mut self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .search(query, k)?
            .into_iter()
            .map(|r| r.payload.text)
            .collect())
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no documents are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
