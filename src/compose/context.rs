//! Context assembly from retrieved matches

use serde::Serialize;

use crate::compose::corrections::clean_text;
use crate::retrieval::Match;

/// Content length ceiling per context record, in characters.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Marker appended when a passage is cut at the ceiling.
pub const TRUNCATION_MARKER: &str = "...";

/// Metadata keys that may carry the passage text, in priority order.
const TEXT_KEYS: [&str; 3] = ["text", "content", "chunk_text"];

/// Metadata keys that may carry the document title, in priority order.
const TITLE_KEYS: [&str; 2] = ["document_title", "source"];

/// One cleaned passage as embedded into the generation prompt.
///
/// Fields serialize to the Portuguese keys the prompt directives refer to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextEntry {
    #[serde(rename = "documento_id")]
    pub id: String,
    #[serde(rename = "document_title")]
    pub title: String,
    #[serde(rename = "relevancia")]
    pub relevance: String,
    #[serde(rename = "conteudo")]
    pub content: String,
}

/// Build one context record per match, preserving retrieval order.
pub fn build_context(matches: &[Match]) -> Vec<ContextEntry> {
    matches
        .iter()
        .enumerate()
        .map(|(idx, m)| build_entry(idx, m))
        .collect()
}

fn build_entry(idx: usize, m: &Match) -> ContextEntry {
    let raw = first_non_empty(m, &TEXT_KEYS).unwrap_or_default();
    let content = truncate_content(clean_text(raw));

    ContextEntry {
        id: m.id.clone().unwrap_or_else(|| format!("doc_{idx}")),
        title: first_non_empty(m, &TITLE_KEYS)
            .map_or_else(|| format!("Documento {}", idx + 1), ToString::to_string),
        relevance: m
            .score
            .map_or_else(|| "N/A".to_string(), |s| format!("{:.2}%", s * 100.0)),
        content,
    }
}

fn first_non_empty<'a>(m: &'a Match, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        m.metadata
            .get(*key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    })
}

/// Cap content at [`MAX_CONTENT_CHARS`] characters, marking the cut.
fn truncate_content(content: String) -> String {
    if content.chars().count() <= MAX_CONTENT_CHARS {
        return content;
    }
    let mut capped: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    capped.push_str(TRUNCATION_MARKER);
    capped
}
