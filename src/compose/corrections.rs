//! Deterministic cleaning of retrieved passages
//!
//! Extracted passages arrive with icon-font glyphs, ragged whitespace and a
//! known set of recurring OCR/ingestion errors. Cleaning is a fixed pipeline:
//! strip the glyphs, collapse whitespace, apply the correction table.

/// Private-use-area glyphs that leak into passages extracted from PDFs.
pub const PRIVATE_USE_MARKS: [char; 3] = ['\u{f0c9}', '\u{f002}', '\u{f142}'];

/// Mandatory corrections, applied in this exact order.
///
/// The enumeration order is part of the contract: later entries may act on
/// text altered by earlier ones, and the casing variants of a phrase are
/// separate entries. Do not reorder.
pub const CORRECTIONS: [(&str, &str); 12] = [
    ("escontado", "descontado"),
    ("ESCONTADO", "DESCONTADO"),
    ("chunk", "documento"),
    ("chunks", "documentos"),
    ("Chunk", "Documento"),
    ("Chunks", "Documentos"),
    ("Abate do Teto Constitucional", "Abate Teto Constitucional"),
    ("ABATE DO TETO CONSTITUCIONAL", "ABATE TETO CONSTITUCIONAL"),
    (
        "Ministério da Economia",
        "Ministério da Gestão e Inovação em Serviços Públicos (MGI)",
    ),
    (
        "MINISTÉRIO DA ECONOMIA",
        "MINISTÉRIO DA GESTÃO E INOVAÇÃO EM SERVIÇOS PÚBLICOS (MGI)",
    ),
    ("Ministério da Infraestrutura", "Ministério do Trabalho (MT)"),
    ("MINISTÉRIO DA INFRAESTRUTURA", "MINISTÉRIO DO TRABALHO (MT)"),
];

/// Clean a raw passage: strip glyphs, collapse whitespace, apply corrections.
///
/// The pipeline is idempotent: running it over its own output changes
/// nothing.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !PRIVATE_USE_MARKS.contains(c))
        .collect();
    let collapsed = normalize_whitespace(&stripped);
    apply_corrections(&collapsed)
}

/// Collapse runs of whitespace (newlines and tabs included) to single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Apply the correction table in enumeration order.
pub fn apply_corrections(text: &str) -> String {
    let mut corrected = text.to_string();
    for (wrong, right) in CORRECTIONS {
        corrected = replace_anchored(&corrected, wrong, right);
    }
    corrected
}

/// Replace `needle` scanning left to right, anchored at word boundaries.
///
/// Anchoring keeps `chunk` out of `chunks` (each casing/plural variant has
/// its own table entry) and keeps a replacement from re-matching on a second
/// pass: `descontado` contains `escontado` but never at a boundary.
fn replace_anchored(text: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(found) = text[pos..].find(needle) {
        let start = pos + found;
        let end = start + needle.len();

        if boundary_before(text, start) && boundary_after(text, end) {
            out.push_str(&text[pos..start]);
            out.push_str(replacement);
            pos = end;
        } else {
            // Not anchored; emit up to and including the first char of this
            // occurrence and keep scanning.
            let step = text[start..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&text[pos..start + step]);
            pos = start + step;
        }
    }

    out.push_str(&text[pos..]);
    out
}

fn boundary_before(text: &str, idx: usize) -> bool {
    text[..idx]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

fn boundary_after(text: &str, idx: usize) -> bool {
    text[idx..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_is_preserved() {
        assert_eq!(CORRECTIONS[0].0, "escontado");
        assert_eq!(CORRECTIONS[2].0, "chunk");
        assert_eq!(CORRECTIONS[3].0, "chunks");
    }

    #[test]
    fn corrects_underscore_separated_identifiers() {
        assert_eq!(apply_corrections("chunk_id"), "documento_id");
        assert_eq!(apply_corrections("chunk_text"), "documento_text");
    }

    #[test]
    fn plural_uses_its_own_entry() {
        assert_eq!(apply_corrections("os chunks encontrados"), "os documentos encontrados");
        assert_eq!(apply_corrections("Chunks de texto"), "Documentos de texto");
    }

    #[test]
    fn already_correct_text_is_untouched() {
        assert_eq!(apply_corrections("valor descontado"), "valor descontado");
        assert_eq!(apply_corrections("DESCONTADO"), "DESCONTADO");
    }

    #[test]
    fn applies_ministry_renames() {
        assert_eq!(
            apply_corrections("consulte o Ministério da Economia."),
            "consulte o Ministério da Gestão e Inovação em Serviços Públicos (MGI)."
        );
        assert_eq!(
            apply_corrections("MINISTÉRIO DA INFRAESTRUTURA"),
            "MINISTÉRIO DO TRABALHO (MT)"
        );
    }

    #[test]
    fn strips_icon_glyphs_and_collapses_whitespace() {
        assert_eq!(
            clean_text("texto\u{f0c9} com \u{f002}\n\n  espaços\t\u{f142}extras"),
            "texto com espaços extras"
        );
    }

    #[test]
    fn cleaning_twice_equals_cleaning_once() {
        let passage = "escontado ESCONTADO chunk chunks Chunk Chunks \
                       Abate do Teto Constitucional Ministério da Economia";
        let once = clean_text(passage);
        assert_eq!(clean_text(&once), once);
    }
}
