//! Common English words dropped from filtered lyrics.
//!
//! The base list comes from the `stop_words` crate. Every entry is passed
//! through the [`TextNormalizer`] so it matches normalized lyrics: "don't" is
//! stored as "dont". Each normalized set is built once per process.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use super::normalizer::{NormalizerConfig, TextNormalizer};

/// Sung fillers that carry no meaning in a keyword search.
pub const LYRIC_FILLERS: &[&str] = &[
    "ah", "hey", "la", "mm", "na", "oh", "ooh", "uh", "whoa", "yeah",
];

static ENGLISH: LazyLock<FxHashSet<String>> = LazyLock::new(|| {
    build_english(&TextNormalizer::new(NormalizerConfig {
        strip_diacritics: false,
    }))
});

static ENGLISH_FOLDED: LazyLock<FxHashSet<String>> = LazyLock::new(|| {
    build_english(&TextNormalizer::new(NormalizerConfig {
        strip_diacritics: true,
    }))
});

static NOTHING: LazyLock<FxHashSet<String>> = LazyLock::new(FxHashSet::default);

/// Entries that normalize to nothing or to more than one word can never
/// equal a single token and are skipped.
fn build_english(normalizer: &TextNormalizer) -> FxHashSet<String> {
    let mut words = FxHashSet::default();

    for entry in get(LANGUAGE::English).iter() {
        let word = normalizer.normalize(entry);
        if word.is_empty() || word.contains(' ') {
            continue;
        }
        words.insert(word);
    }
    words.extend(LYRIC_FILLERS.iter().map(|w| (*w).to_owned()));

    words
}

/// Set lookup over the normalized English list plus [`LYRIC_FILLERS`].
#[derive(Debug, Clone, Copy)]
pub struct StopWords {
    words: &'static FxHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english(NormalizerConfig::default())
    }
}

impl StopWords {
    /// The English set, normalized the way `config` normalizes lyrics.
    pub fn english(config: NormalizerConfig) -> Self {
        let words: &'static FxHashSet<String> = if config.strip_diacritics {
            &*ENGLISH_FOLDED
        } else {
            &*ENGLISH
        };
        Self { words }
    }

    /// A set that filters nothing.
    pub fn empty() -> Self {
        Self { words: &*NOTHING }
    }

    /// Returns true if `token` should be dropped.
    #[inline(always)]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing is filtered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
