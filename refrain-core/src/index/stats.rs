//! Statistics and IndexStats.

use crate::index::types::IndexEngine;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexStats {
    /// Number of indexed records.
    pub songs: usize,
    /// Number of words with at least one record.
    pub unique_words: usize,
    /// Number of inverted-index slots assigned since the last `clear`.
    pub index_slots: usize,
    /// Slots whose word lost its last record.
    pub vacant_slots: usize,
    /// Records per bucket in the primary table.
    pub record_load_factor: f64,
    /// Words per bucket in the word table.
    pub word_load_factor: f64,
}

impl IndexEngine {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            songs: self.records.len(),
            unique_words: self.words.len(),
            index_slots: self.inverted.len(),
            vacant_slots: self.vacant_slots(),
            record_load_factor: self.records.load_factor(),
            word_load_factor: self.words.load_factor(),
        }
    }

    /// Counts inverted-index slots left empty by deletions.
    pub fn vacant_slots(&self) -> usize {
        self.inverted.iter().filter(|slot| slot.is_none()).count()
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} songs, {} words, {} index slots",
            self.songs, self.unique_words, self.index_slots
        )?;

        if self.vacant_slots > 0 {
            write!(f, " ({} vacant)", self.vacant_slots)?;
        }

        write!(
            f,
            ", load factors {:.2} records / {:.2} words",
            self.record_load_factor, self.word_load_factor
        )
    }
}
