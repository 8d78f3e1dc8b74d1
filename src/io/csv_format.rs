//! CSV format handling for uploads, exports and the sample file
//!
//! This module centralizes all CSV format concerns, providing:
//! - Header normalization (`ColumnIndex`) so the validator never sees header order
//! - Conversion from a CSV record to a `RawRow`
//! - Export serialization and the constant sample file
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{CustomerRecord, ImportError, RawRow};
use std::io::Write;

/// Columns every upload must carry (any order, case-insensitive, trimmed)
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "email", "age"];

/// Header written by [`write_customers_csv`]
pub const EXPORT_HEADER: [&str; 4] = ["name", "email", "age", "created_at"];

/// Body of the downloadable sample file
pub const SAMPLE_CSV: &[u8] = b"name,email,age\nAlice,alice@example.com,30\nBob,bob@example.org,25\n";

/// Positions of the required columns within an upload's header row
///
/// Built once per upload from the header. Header cells are trimmed and
/// lower-cased before matching; extra columns are ignored and, when a column
/// name repeats, the first occurrence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    name: usize,
    email: usize,
    age: usize,
}

impl ColumnIndex {
    /// Resolve the required columns from a header row
    ///
    /// # Returns
    ///
    /// * `Ok(ColumnIndex)` - All of `name`, `email`, `age` were found
    /// * `Err(ImportError::MissingHeaderColumns)` - At least one is absent
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, ImportError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: [Option<usize>; 3] = [None; 3];

        for (idx, cell) in headers.into_iter().enumerate() {
            let canonical = normalize_header(cell);
            if let Some(slot) = REQUIRED_COLUMNS.iter().position(|c| *c == canonical) {
                positions[slot].get_or_insert(idx);
            }
        }

        match positions {
            [Some(name), Some(email), Some(age)] => Ok(ColumnIndex { name, email, age }),
            _ => Err(ImportError::MissingHeaderColumns),
        }
    }

    /// Pick the required columns out of one record
    ///
    /// Short rows are tolerated: a missing cell becomes the empty string.
    pub fn extract<'a, I>(&self, record: I) -> RawRow
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut row = RawRow::default();
        for (idx, cell) in record.into_iter().enumerate() {
            if idx == self.name {
                row.name = cell.to_string();
            } else if idx == self.email {
                row.email = cell.to_string();
            } else if idx == self.age {
                row.age = cell.to_string();
            }
        }
        row
    }
}

/// Canonical form of a header cell: BOM stripped, trimmed, lower-cased
fn normalize_header(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Write customer records in export format
///
/// Writes the header `name,email,age,created_at` followed by one row per
/// record, in the order given. Fields containing commas, quotes or line
/// breaks are quoted by the CSV writer.
///
/// # Arguments
///
/// * `records` - Records to write, already ordered by ascending id
/// * `output` - Writer receiving the CSV bytes
pub fn write_customers_csv(
    records: &[CustomerRecord],
    output: &mut dyn Write,
) -> Result<(), ImportError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(EXPORT_HEADER)?;

    for record in records {
        writer.write_record(&[
            record.name.clone(),
            record.email.clone(),
            record.age.to_string(),
            record.created_at_display(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Export records to an in-memory CSV buffer
pub fn export_csv(records: &[CustomerRecord]) -> Result<Vec<u8>, ImportError> {
    let mut output = Vec::new();
    write_customers_csv(records, &mut output)?;
    Ok(output)
}

/// The sample file offered for download; independent of store state
pub fn sample_csv() -> &'static [u8] {
    SAMPLE_CSV
}
