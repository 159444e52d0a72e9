//! Semantic retrieval against the Pinecone index
//!
//! Retrieval is two sequential calls: an embedding request against the
//! Pinecone inference API, then a nearest-neighbor query against the index
//! data plane with metadata included. Provider failures never propagate out
//! of [`Retriever::retrieve`]; they degrade to an empty match list so the
//! caller answers with "no results" instead of an error page.

pub mod pinecone;

pub use pinecone::PineconeClient;

use std::collections::HashMap;

use tracing::debug;
use tracing::warn;

/// One retrieved passage with its relevance score and metadata.
#[derive(Debug, Clone, Default)]
pub struct Match {
    pub id: Option<String>,
    pub score: Option<f32>,
    pub metadata: HashMap<String, String>,
}

/// Retriever for semantic search over the knowledge base.
pub struct Retriever {
    pinecone: PineconeClient,
}

impl Retriever {
    pub fn new(pinecone: PineconeClient) -> Self {
        Self { pinecone }
    }

    /// Retrieve up to `top_k` matches for `question`, ordered by descending
    /// relevance as returned by the index. No local re-ranking.
    pub async fn retrieve(&self, question: &str, top_k: usize) -> Vec<Match> {
        let question = question.trim();
        if question.is_empty() {
            warn!("Empty question, skipping retrieval");
            return Vec::new();
        }

        debug!("Retrieving up to {top_k} matches for: {question}");

        let embedding = match self.pinecone.embed(question).await {
            Ok(values) => values,
            Err(e) => {
                warn!("Embedding generation failed: {e}");
                return Vec::new();
            }
        };

        match self.pinecone.query(&embedding, top_k).await {
            Ok(mut matches) => {
                matches.truncate(top_k);
                debug!("{} documents found", matches.len());
                matches
            }
            Err(e) => {
                warn!("Vector query failed: {e}");
                Vec::new()
            }
        }
    }
}
