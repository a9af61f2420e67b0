//! Public API for adding, removing and retrieving records.

use std::rc::Rc;

use refrain_types::{EngineError, WordId, WordIndex};
use tracing::{debug, info, trace, warn};

use crate::analyzer::distinct_tokens;
use crate::index::types::{by_key, IndexEngine, Postings};
use crate::record::Record;

impl IndexEngine {
    /// Indexes one record.
    ///
    /// Returns `false`, leaving the engine untouched, if a record with the
    /// same title (ignoring case) is already indexed.
    pub fn index_record(&mut self, record: Record) -> bool {
        let Some(record) = self.admit(record) else {
            return false;
        };

        let words = distinct_tokens(record.filtered());
        for word in &words {
            let id = self.ensure_word(word);
            self.link(id, &record);
        }
        debug!(title = record.title(), words = words.len(), "indexed record");
        true
    }

    /// Indexes a batch of records and returns how many were accepted.
    ///
    /// Every new word gets its id (in source order) before any tree is
    /// populated. Duplicate titles, including repeats inside the batch, are
    /// skipped.
    pub fn import_from_source<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let admitted: Vec<Rc<Record>> = records
            .into_iter()
            .filter_map(|record| self.admit(record))
            .collect();

        for record in &admitted {
            for word in distinct_tokens(record.filtered()) {
                self.ensure_word(word);
            }
        }

        for record in &admitted {
            let words = distinct_tokens(record.filtered());
            for word in &words {
                if let Some(id) = self.word_id(word) {
                    self.link(id, record);
                }
            }
            debug!(title = record.title(), words = words.len(), "indexed record");
        }

        info!(
            imported = admitted.len(),
            songs = self.records.len(),
            words = self.words.len(),
            "import finished"
        );
        admitted.len()
    }

    /// Removes the record titled `title` and returns it.
    ///
    /// Words left with no records become unsearchable; their index slots stay
    /// vacant and their ids are not handed out again.
    pub fn take_by_key(&mut self, title: &str) -> Option<Rc<Record>> {
        let record = self.records.take(&Record::key_only(title))?;
        for word in distinct_tokens(record.filtered()) {
            self.unlink_word(word, &record);
        }
        debug!(title = record.title(), "deleted record");
        Some(record)
    }

    /// Removes the record titled `title`. Returns `false` if there was none.
    #[inline]
    pub fn delete_by_key(&mut self, title: &str) -> bool {
        self.take_by_key(title).is_some()
    }

    /// Replaces the record titled `old_title` with `record`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if `old_title` is not indexed, and
    /// `EngineError::Duplicate` if `record`'s title belongs to another
    /// record. In the duplicate case the old record is indexed again.
    pub fn update_record(&mut self, old_title: &str, record: Record) -> Result<(), EngineError> {
        let old = self.take_by_key(old_title).ok_or(EngineError::NotFound)?;
        if self.index_record(record) {
            return Ok(());
        }
        self.index_record(Rc::unwrap_or_clone(old));
        Err(EngineError::Duplicate)
    }

    /// Returns the record titled `title`, ignoring case.
    #[inline]
    pub fn get_by_key(&self, title: &str) -> Option<Rc<Record>> {
        self.records.get(&Record::key_only(title)).cloned()
    }

    /// Refilters `record` and adds it to the primary table unless its title
    /// is taken.
    fn admit(&mut self, mut record: Record) -> Option<Rc<Record>> {
        if self.records.contains(&record) {
            warn!(title = record.title(), "rejected duplicate record");
            return None;
        }
        record.refilter(&self.analyzer);
        let record = Rc::new(record);
        self.records.add(Rc::clone(&record));
        Some(record)
    }

    /// Returns the id of `word`, assigning the next one if it is new.
    fn ensure_word(&mut self, word: &str) -> WordIndex {
        if let Some(id) = self.word_id(word) {
            return id;
        }
        let id = self.next_word_id();
        self.words.add(WordId::new(word, id));
        self.inverted.push(Some(Postings::new()));
        trace!(word, id, "assigned word id");
        id
    }

    fn link(&mut self, id: WordIndex, record: &Rc<Record>) {
        let Some(pos) = self.slot_of(id) else {
            return;
        };
        if let Some(Some(tree)) = self.inverted.get_mut(pos) {
            tree.insert(Rc::clone(record), by_key);
        }
    }

    fn unlink_word(&mut self, word: &str, record: &Rc<Record>) {
        let Some(id) = self.word_id(word) else {
            return;
        };
        let Some(slot) = self.slot_of(id).and_then(|pos| self.inverted.get_mut(pos)) else {
            return;
        };
        if let Some(tree) = slot {
            tree.remove(record, by_key);
            if tree.is_empty() {
                *slot = None;
                self.words.delete(&WordId::key_only(word));
                trace!(word, id, "vacated index slot");
            }
        }
    }
}
