//! Core types and errors for the Refrain lyric index.
//!
//! This crate holds the value types shared by the collections and the
//! index engine in `refrain-core`. Keeping them separate ensures:
//!
//! - **Cross-crate compatibility**: callers outside the core can name errors,
//!   configuration and export summaries without pulling in the collections
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use core::hash::{Hash, Hasher};

/// Position of a word's tree in the inverted index.
///
/// Ids are handed out sequentially, starting at zero, and are never reused.
pub type WordIndex = u32;

/// Errors raised by the list, table and tree when a precondition is violated.
///
/// These are programmer errors. Absence of a value (unknown key, unknown
/// word) is never reported through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A constructor or operation argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The collection holds no elements.
    #[error("collection is empty")]
    EmptyCollection,
    /// The cursor is not positioned on an element.
    #[error("cursor is off the end of the list")]
    CursorInvalid,
    /// An index was outside `0..len`.
    #[error("index {index} out of bounds (len: {len})")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// The number of valid positions.
        len: usize,
    },
}

/// Errors returned by engine-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// An aggregate was requested over zero records.
    #[error("corpus is empty")]
    EmptyCorpus,
    /// No record is stored under the requested key.
    #[error("no record with that title")]
    NotFound,
    /// A record with the same key is already indexed.
    #[error("a record with that title already exists")]
    Duplicate,
    /// An underlying collection rejected the operation.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// A word paired with its slot in the inverted index.
///
/// Equality and hashing look at the word only, so a key built with any id
/// finds the stored mapping.
#[derive(Debug, Clone)]
pub struct WordId {
    word: String,
    id: WordIndex,
}

impl WordId {
    /// Creates a mapping, lowercasing the word.
    pub fn new(word: &str, id: WordIndex) -> Self {
        Self {
            word: word.to_lowercase(),
            id,
        }
    }

    /// Creates a lookup key for `word`. The id is meaningless.
    pub fn key_only(word: &str) -> Self {
        Self::new(word, 0)
    }

    /// Returns the lowercase word.
    #[inline(always)]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the assigned index slot.
    #[inline(always)]
    pub const fn id(&self) -> WordIndex {
        self.id
    }
}

impl PartialEq for WordId {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordId {}

impl Hash for WordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.word, self.id)
    }
}

/// Owned snapshot of a record, as written to the export dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// Record title (primary key).
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Album name, if known.
    pub album: Option<String>,
    /// Raw lyrics as imported.
    pub lyrics: String,
}

impl fmt::Display for RecordSummary {
    /// Renders one block of the export dump, terminated by a blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Year: {}", self.year)?;
        writeln!(f, "Album: {}", self.album.as_deref().unwrap_or("N/A"))?;
        writeln!(f, "Lyrics: {}", self.lyrics)?;
        writeln!(f)
    }
}

/// Engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bucket count of the primary record table. Fixed for the engine's lifetime.
    /// Default: 101
    pub record_capacity: usize,
    /// Bucket count of the word-to-id table. Fixed for the engine's lifetime.
    /// Default: 1009
    pub word_capacity: usize,
    /// Whether common English words are dropped from the filtered text.
    pub filter_stop_words: bool,
    /// Whether Latin diacritics are folded ("café" indexes as "cafe").
    pub strip_diacritics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_capacity: Self::DEFAULT_RECORD_CAPACITY,
            word_capacity: Self::DEFAULT_WORD_CAPACITY,
            filter_stop_words: true,
            strip_diacritics: false,
        }
    }
}

impl EngineConfig {
    /// Default bucket count of the primary record table.
    pub const DEFAULT_RECORD_CAPACITY: usize = 101;
    /// Default bucket count of the word-to-id table.
    pub const DEFAULT_WORD_CAPACITY: usize = 1009;

    /// Small tables for tiny corpora and tests. Collisions are expected.
    pub const fn compact() -> Self {
        Self {
            record_capacity: 7,
            word_capacity: 31,
            filter_stop_words: true,
            strip_diacritics: false,
        }
    }

    /// Keeps stop words in the filtered text, so every word is searchable.
    pub const fn unfiltered() -> Self {
        Self {
            record_capacity: Self::DEFAULT_RECORD_CAPACITY,
            word_capacity: Self::DEFAULT_WORD_CAPACITY,
            filter_stop_words: false,
            strip_diacritics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    #[test]
    fn word_id_lowercases() {
        let w = WordId::new("LoVe", 3);
        assert_eq!(w.word(), "love");
        assert_eq!(w.id(), 3);
    }

    #[test]
    fn word_id_equality_ignores_id() {
        let stored = WordId::new("rain", 12);
        let key = WordId::key_only("Rain");
        assert_eq!(stored, key);
        assert_eq!(hash_of(&stored), hash_of(&key));
        assert_ne!(stored, WordId::new("rainy", 12));
    }

    #[test]
    fn word_id_display() {
        assert_eq!(WordId::new("fire", 4).to_string(), "fire→4");
    }

    #[test]
    fn summary_block_format() {
        let s = RecordSummary {
            title: "Hello".into(),
            year: 2015,
            album: Some("25".into()),
            lyrics: "Hello, it's me".into(),
        };
        assert_eq!(
            s.to_string(),
            "Title: Hello\nYear: 2015\nAlbum: 25\nLyrics: Hello, it's me\n\n"
        );
    }

    #[test]
    fn summary_missing_album() {
        let s = RecordSummary {
            title: "Demo".into(),
            year: 2008,
            album: None,
            lyrics: String::new(),
        };
        assert!(s.to_string().contains("Album: N/A\n"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CollectionError::IndexOutOfBounds { index: 5, len: 2 }.to_string(),
            "index 5 out of bounds (len: 2)"
        );
        assert_eq!(
            CollectionError::InvalidArgument("capacity must be positive").to_string(),
            "invalid argument: capacity must be positive"
        );
        let wrapped: EngineError = CollectionError::EmptyCollection.into();
        assert_eq!(wrapped.to_string(), "collection is empty");
    }

    #[test]
    fn config_presets() {
        let d = EngineConfig::default();
        assert_eq!(d.record_capacity, 101);
        assert!(d.filter_stop_words);
        assert!(!EngineConfig::unfiltered().filter_stop_words);
        assert!(EngineConfig::compact().record_capacity < d.record_capacity);
    }
}
