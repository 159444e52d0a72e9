//! Opening catchphrases and the selection strategy

use rand::seq::SliceRandom;

/// Vivi IA's opening catchphrases; every answer must start with one verbatim.
pub const OPENING_PHRASES: &[&str] = &[
    "Vamos ao que interessa...",
    "Analisando os dados enviados...",
    "Olha só o que temos aqui...",
    "Vamos conferir se está nos conformes...",
];

/// Strategy for choosing the opening phrase.
///
/// Phrase choice is the single non-deterministic behavior in the pipeline,
/// so it lives behind this trait; tests pin it with [`FixedOpening`].
pub trait OpeningSelector: Send + Sync {
    fn select<'a>(&self, phrases: &'a [&'a str]) -> &'a str;
}

/// Uniform random choice, the production strategy.
#[derive(Debug, Default)]
pub struct RandomOpening;

impl OpeningSelector for RandomOpening {
    fn select<'a>(&self, phrases: &'a [&'a str]) -> &'a str {
        phrases
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }
}

/// Always picks the phrase at a fixed index (wrapping); for tests.
#[derive(Debug)]
pub struct FixedOpening(pub usize);

impl OpeningSelector for FixedOpening {
    fn select<'a>(&self, phrases: &'a [&'a str]) -> &'a str {
        if phrases.is_empty() {
            return "";
        }
        phrases[self.0 % phrases.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_selector_wraps_around() {
        let selector = FixedOpening(OPENING_PHRASES.len());
        assert_eq!(selector.select(OPENING_PHRASES), OPENING_PHRASES[0]);
    }

    #[test]
    fn random_selector_stays_within_the_table() {
        let selector = RandomOpening;
        for _ in 0..32 {
            let phrase = selector.select(OPENING_PHRASES);
            assert!(OPENING_PHRASES.contains(&phrase));
        }
    }
}
