//! The end-to-end search agent: retrieve, then compose

use std::sync::Arc;

use tracing::info;

use crate::compose::AnswerComposer;
use crate::compose::OpeningSelector;
use crate::config::AppConfig;
use crate::config::Credentials;
use crate::llm::GeminiClient;
use crate::retrieval::PineconeClient;
use crate::retrieval::Retriever;
use crate::Result;

/// The complete question-to-answer pipeline.
///
/// Holds no mutable state; a single instance serves concurrent requests.
pub struct RagAgent {
    retriever: Retriever,
    composer: AnswerComposer,
    top_k: usize,
}

impl std::fmt::Debug for RagAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagAgent").finish_non_exhaustive()
    }
}

impl RagAgent {
    /// Create the agent, resolving the index host.
    ///
    /// # Errors
    /// - Index description failures (bad credentials, cold start, network)
    /// - HTTP client construction errors
    pub async fn new(config: &AppConfig, credentials: &Credentials) -> Result<Self> {
        let pinecone = PineconeClient::connect(
            credentials.pinecone_api_key.clone(),
            credentials.pinecone_index.clone(),
            config.retrieval.controller_endpoint.clone(),
            config.retrieval.embedding_model.clone(),
            config.retrieval.input_type.clone(),
            config.retrieval.namespace.clone(),
        )
        .await?;

        let gemini = GeminiClient::new(
            credentials.google_api_key.clone(),
            config.generation.model.clone(),
            config.generation.endpoint.clone(),
        )?;

        info!(
            "Vivi IA search agent initialized (index: {})",
            credentials.pinecone_index
        );

        Ok(Self {
            retriever: Retriever::new(pinecone),
            composer: AnswerComposer::new(gemini),
            top_k: config.top_k(),
        })
    }

    /// Replace the opening-phrase strategy.
    #[must_use]
    pub fn with_opening_selector(mut self, opening: Arc<dyn OpeningSelector>) -> Self {
        self.composer = self.composer.with_opening_selector(opening);
        self
    }

    /// Answer a question, absorbing generation failures into an error string.
    pub async fn answer(&self, question: &str) -> String {
        let matches = self.retriever.retrieve(question, self.top_k).await;
        self.composer.compose(question, &matches).await
    }

    /// Answer a question, propagating generation failures so callers can
    /// retry.
    pub async fn try_answer(&self, question: &str) -> Result<String> {
        let matches = self.retriever.retrieve(question, self.top_k).await;
        self.composer.try_compose(question, &matches).await
    }
}
