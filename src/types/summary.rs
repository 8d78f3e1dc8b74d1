//! Import summary types
//!
//! An [`ImportSummary`] is transient: it lives for one upload and is
//! discarded once the response has been rendered.

use serde::Serialize;

/// A rejected row, numbered the way a spreadsheet editor numbers lines
/// (the header is row 1, the first data row is row 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: u64,
    pub message: String,
}

/// Outcome of one import: successful inserts plus per-row failures in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub ok: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    /// Record a successful insert
    pub fn record_success(&mut self) {
        self.ok += 1;
    }

    /// Record a row-level failure; the import carries on with the next row
    pub fn record_error(&mut self, row: u64, message: impl Into<String>) {
        self.errors.push(RowError {
            row,
            message: message.into(),
        });
    }

    /// Number of rejected rows
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
