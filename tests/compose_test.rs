//! Deterministic composition pipeline tests
//!
//! Everything here runs offline: the Gemini client is constructed against an
//! unroutable endpoint and is never reached.

use std::collections::HashMap;
use std::sync::Arc;

use vivirag::compose::build_context;
use vivirag::compose::clean_text;
use vivirag::compose::context::MAX_CONTENT_CHARS;
use vivirag::compose::context::TRUNCATION_MARKER;
use vivirag::compose::prompt::build_prompt;
use vivirag::compose::AnswerComposer;
use vivirag::compose::FixedOpening;
use vivirag::compose::CORRECTIONS;
use vivirag::compose::NO_RESULTS_MESSAGE;
use vivirag::llm::GeminiClient;
use vivirag::retrieval::Match;

fn match_with_text(text: &str) -> Match {
    let mut metadata = HashMap::new();
    metadata.insert("text".to_string(), text.to_string());
    Match {
        id: Some("doc-a".to_string()),
        score: Some(0.9),
        metadata,
    }
}

fn offline_composer() -> AnswerComposer {
    let gemini = GeminiClient::new(
        "test-key".to_string(),
        "test-model".to_string(),
        "http://127.0.0.1:9".to_string(),
    )
    .expect("client");
    AnswerComposer::new(gemini).with_opening_selector(Arc::new(FixedOpening(0)))
}

#[test]
fn cleaning_is_idempotent_over_every_correction_key() {
    let passage = CORRECTIONS
        .iter()
        .map(|(wrong, _)| *wrong)
        .collect::<Vec<_>>()
        .join(" | ");
    let once = clean_text(&passage);
    let twice = clean_text(&once);
    assert_eq!(once, twice);
}

#[test]
fn corrections_rewrite_known_ingestion_errors() {
    let cleaned =
        clean_text("O chunk_id mostra o valor escontado pelo Ministério da Economia.");
    assert_eq!(
        cleaned,
        "O documento_id mostra o valor descontado pelo Ministério da Gestão e Inovação em \
         Serviços Públicos (MGI)."
    );
}

#[tokio::test]
async fn empty_matches_short_circuit_generation() {
    let composer = offline_composer();

    // The endpoint is unroutable; reaching the generation service would
    // surface as an error string, not the fixed message.
    let answer = composer.compose("Como funciona o SIAPE?", &[]).await;
    assert_eq!(answer, NO_RESULTS_MESSAGE);

    let strict = composer.try_compose("Como funciona o SIAPE?", &[]).await;
    assert_eq!(strict.expect("no-results is not an error"), NO_RESULTS_MESSAGE);
}

#[test]
fn context_preserves_order_and_length() {
    let long = "a".repeat(MAX_CONTENT_CHARS + 1000);
    let matches = vec![
        match_with_text("primeiro"),
        match_with_text(&long),
        Match::default(),
    ];

    let context = build_context(&matches);

    assert_eq!(context.len(), matches.len());
    assert_eq!(context[0].content, "primeiro");
    assert_eq!(
        context[1].content.chars().count(),
        MAX_CONTENT_CHARS + TRUNCATION_MARKER.chars().count()
    );
    assert!(context[1].content.ends_with(TRUNCATION_MARKER));
    assert_eq!(context[2].content, "");
}

#[test]
fn synthetic_ids_and_default_titles() {
    let context = build_context(&[Match::default()]);
    assert_eq!(context[0].id, "doc_0");
    assert_eq!(context[0].title, "Documento 1");
    assert_eq!(context[0].relevance, "N/A");
}

#[test]
fn title_falls_back_to_source() {
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), "manual_siape.pdf".to_string());
    metadata.insert("text".to_string(), "conteúdo".to_string());

    let context = build_context(&[Match {
        id: None,
        score: None,
        metadata,
    }]);

    assert_eq!(context[0].title, "manual_siape.pdf");
}

#[test]
fn relevance_formats_as_a_percentage() {
    let context = build_context(&[Match {
        id: None,
        score: Some(0.8734),
        metadata: HashMap::new(),
    }]);
    assert_eq!(context[0].relevance, "87.34%");
}

#[test]
fn prompt_pins_the_injected_opening_phrase() {
    let context = build_context(&[match_with_text("Texto sobre consignações.")]);
    let prompt = build_prompt(
        "Vamos ao que interessa...",
        "O que é consignação?",
        &context,
    )
    .expect("prompt");

    assert!(prompt.contains(
        "COMECE SUA RESPOSTA com EXATAMENTE esta frase: \"Vamos ao que interessa...\""
    ));
    assert!(prompt.contains("O que é consignação?"));
    assert!(prompt.contains("Texto sobre consignações."));
    assert!(prompt.contains("- SEMPRE substitua \"escontado\" por \"descontado\""));
}
