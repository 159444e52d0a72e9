//! Answer composition: cleaning, context assembly, prompt, generation
//!
//! Everything here except the final Gemini call is deterministic: the same
//! matches and the same opening phrase always produce the same prompt.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vivirag::compose::AnswerComposer;
//! use vivirag::llm::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gemini = GeminiClient::new(
//!         "api-key".to_string(),
//!         "gemini-2.0-flash-exp".to_string(),
//!         "https://generativelanguage.googleapis.com".to_string(),
//!     )?;
//!     let composer = AnswerComposer::new(gemini);
//!
//!     let resposta = composer.compose("Como funciona o SIAPE?", &[]).await;
//!     println!("{resposta}");
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod corrections;
pub mod phrases;
pub mod prompt;

pub use context::build_context;
pub use context::ContextEntry;
pub use corrections::apply_corrections;
pub use corrections::clean_text;
pub use corrections::CORRECTIONS;
pub use phrases::FixedOpening;
pub use phrases::OpeningSelector;
pub use phrases::RandomOpening;
pub use phrases::OPENING_PHRASES;

use std::sync::Arc;

use tracing::debug;
use tracing::error;

use crate::llm::GeminiClient;
use crate::retrieval::Match;
use crate::Result;

/// Fixed answer used when retrieval produced nothing.
pub const NO_RESULTS_MESSAGE: &str = "❌ Nenhum resultado encontrado no banco de dados.";

/// Turns retrieved matches into a Vivi IA answer.
pub struct AnswerComposer {
    gemini: GeminiClient,
    opening: Arc<dyn OpeningSelector>,
}

impl AnswerComposer {
    pub fn new(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            opening: Arc::new(RandomOpening),
        }
    }

    /// Replace the opening-phrase strategy (tests pin it with [`FixedOpening`]).
    #[must_use]
    pub fn with_opening_selector(mut self, opening: Arc<dyn OpeningSelector>) -> Self {
        self.opening = opening;
        self
    }

    /// Compose an answer, absorbing generation failures into an error string.
    ///
    /// Callers always get a usable payload out of this; callers that want to
    /// retry on failure use [`Self::try_compose`] instead.
    pub async fn compose(&self, question: &str, matches: &[Match]) -> String {
        match self.try_compose(question, matches).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Generation failed: {e}");
                format!("Erro ao processar com IA: {e}")
            }
        }
    }

    /// Compose an answer, propagating generation failures.
    ///
    /// An empty match list short-circuits to [`NO_RESULTS_MESSAGE`] without
    /// touching the generation service.
    pub async fn try_compose(&self, question: &str, matches: &[Match]) -> Result<String> {
        if matches.is_empty() {
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        let context = build_context(matches);
        let catchphrase = self.opening.select(OPENING_PHRASES);
        let prompt = prompt::build_prompt(catchphrase, question, &context)?;

        let answer = self.gemini.generate(&prompt).await?;

        for (idx, entry) in context.iter().enumerate() {
            debug!(
                "Documento {}: id={} titulo={} relevancia={} conteudo={}",
                idx + 1,
                entry.id,
                entry.title,
                entry.relevance,
                preview(&entry.content),
            );
        }

        Ok(answer)
    }
}

/// First 150 characters of a passage, for debug output.
fn preview(content: &str) -> &str {
    match content.char_indices().nth(150) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
