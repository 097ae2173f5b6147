//! Text embedding using local models
//!
//! Uses sentence-transformers/all-MiniLM-L6-v2 via the fastembed crate (ONNX runtime).
//!
//! # Model Details
//!
//! - Dimensions: 384
//! - Max tokens: 256
//! - Same encoding for documents and queries
//!
//! # Usage
//!
//! ```ignore
//! use nanguide_lib::embed::{Embedder, MiniLmEmbedder};
//!
//! let mut embedder = MiniLmEmbedder::new()?;
//!
//! // Encode documents (for loading)
//! let doc_embeddings = embedder.encode(&["ดอยภูแว ...", "วัดภูมินทร์ ..."])?;
//!
//! // Encode a query (for retrieval)
//! let query_embedding = embedder.encode_query("น้ำตกที่น่านมีที่ไหนบ้าง")?;
//! ```

use crate::{Error, Result};

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding models
pub trait Embedder: Send + Sync {
    /// Encode texts, one vector per input, in input order.
    fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Encode a single query for searching
    fn encode_query(&mut self, text: &str) -> Result<Embedding> {
        let embedding = self
            .encode(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("model returned no embeddings".to_string()))?;
        check_dimensions(std::slice::from_ref(&embedding), self.dimension())?;
        Ok(embedding)
    }

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

/// Fail with [`Error::Embedding`] unless every vector has `dimension` values.
pub fn check_dimensions(embeddings: &[Embedding], dimension: usize) -> Result<()> {
    match embeddings.iter().position(|e| e.len() != dimension) {
        Some(i) => Err(Error::Embedding(format!(
            "embedding {i} has dimension {}, model declares {dimension}",
            embeddings[i].len()
        ))),
        None => Ok(()),
    }
}

mod minilm;
pub use minilm::*;
