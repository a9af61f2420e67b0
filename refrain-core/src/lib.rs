//! In-memory song store with title lookup and keyword search.
//!
//! The engine is built from three hand-rolled collections:
//!
//! - [`OrderedList`]: doubly linked list with a cursor, used as bucket storage
//! - [`ChainedTable`]: fixed-capacity hash table with separate chaining
//! - [`OrderedTree`]: binary search tree ordered by a caller-supplied closure
//!
//! [`IndexEngine`] ties them together: a primary table of records keyed by
//! title, a table mapping words to dense ids, and an inverted index holding,
//! per word id, a tree of the records whose lyrics contain that word.
//!
//! ```
//! use refrain_core::{IndexEngine, Record};
//!
//! let mut engine = IndexEngine::new();
//! engine.index_record(Record::new("Hello", 2015, Some("25".into()), "Hello from the other side, California dreaming"));
//!
//! let hits = engine.keyword_search("california").unwrap_or_default();
//! assert_eq!(hits[0].title(), "Hello");
//! ```

pub mod analyzer;
pub mod arena;
pub mod index;
pub mod list;
pub mod record;
pub mod table;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use analyzer::Analyzer;
pub use index::{IndexEngine, IndexStats};
pub use list::OrderedList;
pub use record::Record;
pub use table::ChainedTable;
pub use tree::OrderedTree;

pub use refrain_types::{
    CollectionError, EngineConfig, EngineError, RecordSummary, WordId, WordIndex,
};
