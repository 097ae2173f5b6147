//! The two actions offered to a user: load the documents, submit a question
//!
//! An empty question is answered with a warning instead of an error and never
//! reaches the retriever or the completion service.

use crate::embed::Embedder;
use crate::generate::{AnswerGenerator, CompletionService};
use crate::store::VectorStore;
use crate::Result;

/// Shown when a question is submitted with no text.
pub const EMPTY_QUERY_WARNING: &str = "กรุณาพิมพ์คำถามก่อนส่ง";

/// Shown after the documents have been loaded.
pub const LOADED_MESSAGE: &str = "ข้อมูลเอกสารพร้อมใช้งานแล้ว!";

/// Outcome of submitting a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Generated answer text
    Answer(String),
    /// Non-fatal message for the user; nothing was generated
    Warning(String),
}

/// A generator together with the document set it loads.
pub struct Session<E: Embedder, S: VectorStore, C: CompletionService> {
    generator: AnswerGenerator<E, S, C>,
    documents: Vec<String>,
}

impl<E: Embedder, S: VectorStore, C: CompletionService> Session<E, S, C> {
    #[must_use]
    pub fn new(generator: AnswerGenerator<E, S, C>, documents: Vec<String>) -> Self {
        Self {
            generator,
            documents,
        }
    }

    /// (Re)load the document set, replacing anything loaded before.
    pub fn load_documents(&mut self) -> Result<usize> {
        self.generator.retriever_mut().load(&self.documents)
    }

    /// Answer `query`, or warn if it is blank.
    pub async fn submit(&mut self, query: &str) -> Result<Reply> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Reply::Warning(EMPTY_QUERY_WARNING.to_string()));
        }

        self.generator.generate_answer(query).await.map(Reply::Answer)
    }

    /// `true` once documents have been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.generator.retriever().store().collection().is_some()
    }

    #[must_use]
    pub fn generator(&self) -> &AnswerGenerator<E, S, C> {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::corpus::nan_guide;
    use crate::generate::APOLOGY;
    use crate::retrieve::Retriever;
    use crate::store::MemoryStore;
    use crate::testing::{CapturingCompletion, KeywordEmbedder};
    use crate::Error;

    type TestSession = Session<KeywordEmbedder, MemoryStore, CapturingCompletion>;

    fn session(client: CapturingCompletion) -> TestSession {
        let retriever = Retriever::new(
            KeywordEmbedder::new(&["น้ำตก", "วัด", "ดอย"]),
            MemoryStore::new(),
        );
        let config = Config::new("test-key").unwrap();
        Session::new(AnswerGenerator::new(retriever, client, &config), nan_guide())
    }

    #[tokio::test]
    async fn test_empty_query_warns_without_calls() {
        let client = CapturingCompletion::replying("unused");
        let mut session = session(client.clone());
        session.load_documents().unwrap();
        let encodes_after_load = session.generator().retriever().embedder().calls;

        for query in ["", "   ", "\n\t"] {
            let reply = session.submit(query).await.unwrap();
            assert_eq!(reply, Reply::Warning(EMPTY_QUERY_WARNING.to_string()));
        }

        assert_eq!(client.call_count(), 0);
        assert_eq!(
            session.generator().retriever().embedder().calls,
            encodes_after_load,
            "retriever must not be invoked for an empty query"
        );
    }

    #[tokio::test]
    async fn test_empty_query_warns_even_before_load() {
        let client = CapturingCompletion::replying("unused");
        let mut session = session(client.clone());

        let reply = session.submit("").await.unwrap();
        assert!(matches!(reply, Reply::Warning(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_answers_after_load() {
        let client = CapturingCompletion::replying("ดอยภูแว");
        let mut session = session(client.clone());

        assert!(!session.is_loaded());
        assert_eq!(session.load_documents().unwrap(), 8);
        assert!(session.is_loaded());

        let reply = session.submit("  น้ำตกที่น่านมีที่ไหนบ้าง ").await.unwrap();
        assert_eq!(reply, Reply::Answer("ดอยภูแว".to_string()));

        let request = client.last_request().unwrap();
        assert!(request.messages[1].content.contains("คำถาม: น้ำตกที่น่านมีที่ไหนบ้าง\n"));
    }

    #[tokio::test]
    async fn test_out_of_region_query_sends_apology_instruction() {
        let client = CapturingCompletion::replying(APOLOGY);
        let mut session = session(client.clone());
        session.load_documents().unwrap();

        let reply = session.submit("ภูเก็ตมีหาดอะไรบ้าง").await.unwrap();
        assert_eq!(reply, Reply::Answer(APOLOGY.to_string()));

        let request = client.last_request().unwrap();
        assert!(request.messages[0].content.contains(APOLOGY));
    }

    #[tokio::test]
    async fn test_submit_before_load_is_an_error() {
        let client = CapturingCompletion::replying("unused");
        let mut session = session(client.clone());

        let err = session.submit("วัดภูมินทร์").await.unwrap_err();
        assert!(matches!(err, Error::StoreNotInitialized));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces() {
        let mut session = session(CapturingCompletion::failing());
        session.load_documents().unwrap();

        let err = session.submit("วัดภูมินทร์").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_load_is_repeatable() {
        let mut session = session(CapturingCompletion::replying("unused"));
        assert_eq!(session.load_documents().unwrap(), 8);
        assert_eq!(session.load_documents().unwrap(), 8);
        assert_eq!(session.generator().retriever().len(), 8);
    }
}
