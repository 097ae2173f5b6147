//! Grounded answer generation
//!
//! Retrieves context for a question, wraps it in a fixed instruction, and
//! asks a chat-completion service for the answer.
//!
//! ```text
//! query -> Retriever -> context block -> prompt -> CompletionService -> answer
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use nanguide_lib::generate::{AnswerGenerator, GroqClient};
//!
//! let client = GroqClient::new(&config)?;
//! let mut generator = AnswerGenerator::new(retriever, client, &config);
//! let answer = generator.generate_answer("น้ำตกที่น่านมีที่ไหนบ้าง").await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::embed::Embedder;
use crate::retrieve::Retriever;
use crate::store::VectorStore;
use crate::{Error, Result};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// Chat-completion response body. Fields other than the choices are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    pub fn into_first_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Generation("response contained no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| Error::Generation("first choice has no content".to_string()))
    }
}

/// A chat-completion backend
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Answers questions from retrieved documents.
pub struct AnswerGenerator<E: Embedder, S: VectorStore, C: CompletionService> {
    retriever: Retriever<E, S>,
    client: C,
    model: String,
    temperature: f32,
    top_k: usize,
}

impl<E: Embedder, S: VectorStore, C: CompletionService> AnswerGenerator<E, S, C> {
    /// Model, temperature and top-k are taken from `config`.
    #[must_use]
    pub fn new(retriever: Retriever<E, S>, client: C, config: &Config) -> Self {
        Self {
            retriever,
            client,
            model: config.model().to_string(),
            temperature: config.temperature(),
            top_k: config.top_k(),
        }
    }

    /// Retrieve context for `query` and generate an answer from it.
    ///
    /// Any retrieval or completion failure aborts the whole query.
    pub async fn generate_answer(&mut self, query: &str) -> Result<String> {
        let context = self.retriever.retrieve(query, self.top_k)?;
        let request = self.build_request(&context, query);

        debug!(
            model = %request.model,
            context_docs = context.len(),
            "requesting completion"
        );

        self.client.complete(&request).await?.into_first_content()
    }

    /// The request sent for `query` given the retrieved `context`.
    #[must_use]
    pub fn build_request<T: AsRef<str>>(&self, context: &[T], query: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(context, query)),
            ],
        }
    }

    /// Returns a reference to the retriever.
    #[must_use]
    pub fn retriever(&self) -> &Retriever<E, S> {
        &self.retriever
    }

    /// Returns a mutable reference to the retriever.
    pub fn retriever_mut(&mut self) -> &mut Retriever<E, S> {
        &mut self.retriever
    }
}

mod groq;
mod prompt;

pub use groq::*;
pub use prompt::*;
