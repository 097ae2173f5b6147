//! Error types for NanGuide

use thiserror::Error;

/// Result type alias for NanGuide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in NanGuide operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, e.g. no API key
    #[error("configuration error: {0}")]
    Config(String),

    /// The embedding model could not be loaded
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// The embedding model failed while encoding text
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The vector store was used before a collection was created
    #[error("vector store not initialized: no collection has been created")]
    StoreNotInitialized,

    /// A bulk write to the vector store was rejected
    #[error("store write error: {0}")]
    StoreWrite(String),

    /// The completion service failed or returned something unusable
    #[error("generation error: {0}")]
    Generation(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
