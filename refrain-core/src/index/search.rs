//! Keyword search and corpus aggregates.

use std::rc::Rc;

use refrain_types::EngineError;
use tracing::warn;

use crate::index::types::IndexEngine;
use crate::record::Record;

impl IndexEngine {
    /// Returns every record whose filtered lyrics contain `word`, ordered by
    /// title.
    ///
    /// The query is normalized like lyrics are. Returns `None` for words that
    /// were never indexed or whose last record was removed.
    pub fn keyword_search(&self, word: &str) -> Option<Vec<Rc<Record>>> {
        let query = self.analyzer.normalize_query(word);
        let id = self.word_id(&query)?;
        let tree = self.inverted.get(self.slot_of(id)?)?.as_ref()?;
        Some(tree.in_order().into_iter().cloned().collect())
    }

    /// Number of indexed records.
    #[inline(always)]
    pub fn song_count(&self) -> usize {
        self.records.len()
    }

    /// Number of words that currently have at least one record.
    #[inline(always)]
    pub fn unique_word_count(&self) -> usize {
        self.words.len()
    }

    /// Mean release year, truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyCorpus` if no records are indexed.
    pub fn average_year(&self) -> Result<i32, EngineError> {
        let count = self.records.len();
        if count == 0 {
            warn!("average year requested on an empty corpus");
            return Err(EngineError::EmptyCorpus);
        }
        let total: i64 = self.records.iter().map(|r| i64::from(r.year())).sum();
        Ok((total / count as i64) as i32)
    }
}
