//! NanGuide - retrieval-augmented answers about places to visit in Nan province
//!
//! # Architecture
//!
//! ```text
//! Documents -> Embedder -> Store
//!                           |
//! Query -> Embedder -> Retriever
//!                           |
//!                     context block
//!                           |
//!                  CompletionService -> Answer
//! ```
//!
//! # Example
//!
//! ```ignore
//! use nanguide_lib::{
//!     config::Config,
//!     corpus,
//!     embed::MiniLmEmbedder,
//!     generate::{AnswerGenerator, GroqClient},
//!     retrieve::Retriever,
//!     session::{Reply, Session},
//!     store::MemoryStore,
//! };
//!
//! let config = Config::from_env()?;
//! let retriever = Retriever::new(MiniLmEmbedder::new()?, MemoryStore::new());
//! let generator = AnswerGenerator::new(retriever, GroqClient::new(&config)?, &config);
//! let mut session = Session::new(generator, corpus::nan_guide());
//!
//! session.load_documents()?;
//! if let Reply::Answer(text) = session.submit("น้ำตกที่น่านมีที่ไหนบ้าง").await? {
//!     println!("{text}");
//! }
//! ```

pub mod config;
pub mod corpus;
pub mod embed;
pub mod error;
pub mod generate;
pub mod retrieve;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
