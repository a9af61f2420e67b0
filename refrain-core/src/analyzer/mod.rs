//! Text analysis pipeline.
//!
//! This module turns raw lyrics into the filtered text that gets indexed:
//! - **Normalizer**: lowercases and strips punctuation
//! - **StopWords**: drops common English words
//! - **Tokenizer**: splits filtered text into words
//!
//! Keyword queries pass through the same normalizer, so a query matches
//! exactly the words the index was built from.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use stopwords::StopWords;
pub use tokenizer::{distinct_tokens, Tokenizer};

use refrain_types::EngineConfig;

/// Normalizer plus stop-word filter, configured from an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    stop_words: StopWords,
    tokenizer: Tokenizer,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Analyzer {
    /// Creates an analyzer honoring `filter_stop_words` and `strip_diacritics`.
    pub fn new(config: &EngineConfig) -> Self {
        let normalizer_config = NormalizerConfig {
            strip_diacritics: config.strip_diacritics,
        };
        let stop_words = if config.filter_stop_words {
            StopWords::english(normalizer_config)
        } else {
            StopWords::empty()
        };

        Self {
            normalizer: TextNormalizer::new(normalizer_config),
            stop_words,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Produces filtered text: normalized words, stop words removed, joined
    /// by single spaces.
    pub fn filter(&self, raw: &str) -> String {
        let normalized = self.normalizer.normalize(raw);
        if self.stop_words.is_empty() {
            return normalized;
        }

        let mut out = String::with_capacity(normalized.len());
        self.tokenizer.tokenize(&normalized, |word| {
            if self.stop_words.contains(word) {
                return;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        });
        out
    }

    /// Normalizes a keyword query the way lyrics are normalized.
    ///
    /// Stop words are not removed, so searching for one simply finds nothing.
    pub fn normalize_query(&self, word: &str) -> String {
        self.normalizer.normalize(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_drops_stop_words() {
        let analyzer = Analyzer::default();
        assert_eq!(
            analyzer.filter("Don't! The MOONLIGHT and the rain"),
            "moonlight rain"
        );
    }

    #[test]
    fn filter_drops_lyric_fillers() {
        assert_eq!(Analyzer::default().filter("Ooh, love... yeah yeah"), "love");
    }

    #[test]
    fn filter_of_only_stop_words_is_empty() {
        assert_eq!(Analyzer::default().filter("in the, uh... oh"), "");
        assert_eq!(Analyzer::default().filter("the and of"), "");
    }

    #[test]
    fn unfiltered_keeps_every_word() {
        let analyzer = Analyzer::new(&EngineConfig::unfiltered());
        assert_eq!(analyzer.filter("Set fire to the rain"), "set fire to the rain");
    }

    #[test]
    fn strip_diacritics_from_config() {
        let config = EngineConfig {
            strip_diacritics: true,
            ..EngineConfig::default()
        };
        assert_eq!(Analyzer::new(&config).filter("Café Señorita"), "cafe senorita");
        assert_eq!(Analyzer::new(&config).filter("the café"), "cafe");
        assert_eq!(Analyzer::default().filter("Café"), "café");
    }

    #[test]
    fn query_normalization() {
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.normalize_query("  LOVE! "), "love");
        assert_eq!(analyzer.normalize_query("Don't"), "dont");
    }
}
