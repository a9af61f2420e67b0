//! Export dump.

use std::io::{self, Write};

use refrain_types::RecordSummary;

use crate::index::types::IndexEngine;

impl IndexEngine {
    /// Snapshots every record in primary-table bucket order.
    pub fn export(&self) -> Vec<RecordSummary> {
        self.records.iter().map(|r| r.summary()).collect()
    }

    /// Writes the export dump, one blank-line-terminated block per record.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn export_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in self.records.iter() {
            write!(out, "{}", record.summary())?;
        }
        out.flush()
    }
}
