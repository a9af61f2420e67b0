//! Index types and constants.

use core::cmp::Ordering;
use core::num::NonZeroUsize;
use std::rc::Rc;

use refrain_types::{CollectionError, EngineConfig, WordId, WordIndex};

use crate::analyzer::Analyzer;
use crate::record::Record;
use crate::table::ChainedTable;
use crate::tree::OrderedTree;

const RECORD_BUCKETS: NonZeroUsize = match NonZeroUsize::new(EngineConfig::DEFAULT_RECORD_CAPACITY)
{
    Some(n) => n,
    None => panic!("default record capacity must be non-zero"),
};

const WORD_BUCKETS: NonZeroUsize = match NonZeroUsize::new(EngineConfig::DEFAULT_WORD_CAPACITY) {
    Some(n) => n,
    None => panic!("default word capacity must be non-zero"),
};

/// Records containing one word, ordered by title.
pub(crate) type Postings = OrderedTree<Rc<Record>>;

/// Orders shared records by title.
#[inline]
pub(crate) fn by_key(a: &Rc<Record>, b: &Rc<Record>) -> Ordering {
    a.cmp_key(b)
}

/// In-memory song index with title lookup and keyword search.
///
/// Records are shared between the primary table and the per-word trees, so
/// the engine holds `Rc` handles and is neither `Send` nor `Sync`.
pub struct IndexEngine {
    /// Primary store keyed by title
    pub(crate) records: ChainedTable<Rc<Record>>,
    /// Word to inverted-index slot
    pub(crate) words: ChainedTable<WordId>,
    /// One slot per word id; `None` once the word's last record is removed
    pub(crate) inverted: Vec<Option<Postings>>,
    /// Id held by `inverted[0]`; ids issued before a `clear` are retired
    pub(crate) id_base: WordIndex,
    pub(crate) analyzer: Analyzer,
    pub(crate) config: EngineConfig,
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexEngine {
    /// Creates an empty engine with the default configuration.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            records: ChainedTable::with_buckets(RECORD_BUCKETS),
            words: ChainedTable::with_buckets(WORD_BUCKETS),
            inverted: Vec::new(),
            id_base: 0,
            analyzer: Analyzer::new(&config),
            config,
        }
    }

    /// Creates an empty engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if either table capacity is
    /// zero.
    pub fn with_config(config: EngineConfig) -> Result<Self, CollectionError> {
        Ok(Self {
            records: ChainedTable::new(config.record_capacity)?,
            words: ChainedTable::new(config.word_capacity)?,
            inverted: Vec::new(),
            id_base: 0,
            analyzer: Analyzer::new(&config),
            config,
        })
    }

    /// Returns the configuration the engine was built with.
    #[inline(always)]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the analyzer used for lyrics and queries.
    #[inline(always)]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Returns `true` if no records are indexed.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes all records and words.
    ///
    /// Ids already handed out are retired: words indexed afterwards get ids
    /// above every id issued before the clear.
    pub fn clear(&mut self) {
        self.records.clear();
        self.words.clear();
        self.id_base = self.next_word_id();
        self.inverted.clear();
    }

    /// Looks up the index slot of an already normalized word.
    #[inline]
    pub(crate) fn word_id(&self, word: &str) -> Option<WordIndex> {
        self.words.get(&WordId::key_only(word)).map(WordId::id)
    }

    /// The id the next new word will receive.
    #[inline]
    pub(crate) fn next_word_id(&self) -> WordIndex {
        self.id_base + self.inverted.len() as WordIndex
    }

    /// Position of `id` in the inverted index, if it belongs to the current
    /// id range.
    #[inline]
    pub(crate) fn slot_of(&self, id: WordIndex) -> Option<usize> {
        id.checked_sub(self.id_base).map(|offset| offset as usize)
    }
}
