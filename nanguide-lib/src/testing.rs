//! Deterministic stand-ins for the embedding model and completion service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::embed::{Embedder, Embedding};
use crate::generate::{ChatRequest, ChatResponse, Choice, CompletionService, ResponseMessage};
use crate::{Error, Result};

/// Embeds a text as the occurrence count of each keyword.
pub struct KeywordEmbedder {
    keywords: Vec<&'static str>,
    pub calls: usize,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            calls: 0,
        }
    }
}

impl Embedder for KeywordEmbedder {
    fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        self.calls += 1;
        Ok(texts
            .iter()
            .map(|text| {
                self.keywords
                    .iter()
                    .map(|kw| text.matches(*kw).count() as f32)
                    .collect()
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.keywords.len()
    }

    fn model_name(&self) -> &str {
        "keyword-count"
    }
}

/// An embedder whose model never loads.
pub struct UnavailableEmbedder;

impl Embedder for UnavailableEmbedder {
    fn encode(&mut self, _texts: &[&str]) -> Result<Vec<Embedding>> {
        Err(Error::ModelUnavailable("model files missing".to_string()))
    }

    fn dimension(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "unavailable"
    }
}

/// Declares a dimension but returns vectors of `width` values, optionally
/// dropping the last `shortfall` of them.
pub struct MisshapenEmbedder {
    pub dimension: usize,
    pub width: usize,
    pub shortfall: usize,
}

impl MisshapenEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            width: dimension,
            shortfall: 0,
        }
    }
}

impl Embedder for MisshapenEmbedder {
    fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let count = texts.len().saturating_sub(self.shortfall);
        Ok((0..count)
            .map(|i| {
                let mut vector = vec![0.0; self.width];
                if let Some(v) = vector.get_mut(i % self.width.max(1)) {
                    *v = 1.0;
                }
                vector
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "misshapen"
    }
}

/// Records every request and answers with a fixed reply.
#[derive(Clone, Default)]
pub struct CapturingCompletion {
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
    pub calls: Arc<AtomicUsize>,
    reply: Option<String>,
}

impl CapturingCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    /// A service that fails every call.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionService for CapturingCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let content = self
            .reply
            .clone()
            .ok_or_else(|| Error::Generation("service unreachable".to_string()))?;

        Ok(ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some(content),
                },
            }],
        })
    }
}
