//! Song indexing engine.
//!
//! Memory Layout:
//! - Records live once, behind `Rc`, and are shared by the primary table and
//!   every tree of the words they contain
//! - Words map to a dense, append-only id; the id, less the ids retired by
//!   the last `clear`, is the position of the word's tree in the inverted
//!   index
//! - Deleting a word's last record leaves its slot vacant rather than
//!   shifting later slots, so ids stay stable
//!
//! Threading:
//! - [`IndexEngine`] is not `Send`/`Sync`. A multi-structure update such as
//!   indexing or deleting a record is not atomic, so any concurrent use must
//!   serialize whole operations.

mod api;
mod export;
mod search;
mod stats;
mod types;

pub use stats::IndexStats;
pub use types::IndexEngine;
