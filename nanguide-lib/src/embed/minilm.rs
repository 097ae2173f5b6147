use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::debug;

use crate::embed::{check_dimensions, Embedder, Embedding};
use crate::{Error, Result};

/// Output dimension of all-MiniLM-L6-v2
pub const MINILM_DIMENSION: usize = 384;

/// MiniLM embedder using sentence-transformers/all-MiniLM-L6-v2.
///
/// Uses fastembed for ONNX-based inference. The model is loaded once at
/// construction and reused for every call.
pub struct MiniLmEmbedder {
    model: TextEmbedding,
}

impl MiniLmEmbedder {
    /// Create a new MiniLM embedder using fastembed's default cache directory.
    ///
    /// Downloads the model on first use (~90MB).
    pub fn new() -> Result<Self> {
        Self::load(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
    }

    /// Create a new MiniLM embedder caching model files under `cache_dir`.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::load(InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_cache_dir(cache_dir.into()))
    }

    fn load(opts: InitOptions) -> Result<Self> {
        TextEmbedding::try_new(opts.with_show_download_progress(true))
            .map(|model| Self { model })
            .map_err(|e| Error::ModelUnavailable(e.to_string()))
    }
}

impl Embedder for MiniLmEmbedder {
    fn model_name(&self) -> &str {
        "sentence-transformers/all-MiniLM-L6-v2"
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        debug!(count = texts.len(), "encoding texts");

        let embeddings = self
            .model
            .embed(texts, None)
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, model returned {}",
                texts.len(),
                embeddings.len()
            )));
        }

        check_dimensions(&embeddings, MINILM_DIMENSION)?;
        Ok(embeddings)
    }
}
