//! Asynchronous CSV reader over an uploaded file
//!
//! Reads the header first, resolves the required columns, and then yields
//! one [`RawRow`] per record together with its spreadsheet row number.
//!
//! # Design
//!
//! The UploadReader uses csv-async for streaming CSV parsing, delegating
//! header normalization and column extraction to the csv_format module.
//!
//! ```text
//! Upload bytes → UploadReader → (row number, RawRow)
//!                     ↓
//!              csv_format module
//!              (ColumnIndex)
//! ```
//!
//! # Error Handling
//!
//! - A header without `name`, `email` and `age` fails `open()` before any row is read
//! - Malformed records and invalid UTF-8 are returned as errors from `next_row()`
//! - Blank lines are skipped and do not consume a row number

use crate::io::csv_format::ColumnIndex;
use crate::types::{ImportError, RawRow};
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;

/// Row number of the first data row; the header is row 1
pub const FIRST_DATA_ROW: u64 = 2;

/// Streaming reader over one uploaded CSV
pub struct UploadReader<R: AsyncRead + Unpin + Send> {
    csv_reader: AsyncReader<R>,
    columns: ColumnIndex,
    record: StringRecord,
    next_row_number: u64,
}

impl<R: AsyncRead + Unpin + Send> UploadReader<R> {
    /// Read and validate the header row
    ///
    /// The reader is flexible: rows may be shorter or longer than the header.
    ///
    /// # Returns
    ///
    /// * `Ok(UploadReader)` positioned at the first data row
    /// * `Err(ImportError::MissingHeaderColumns)` if a required column is absent
    /// * `Err(ImportError)` if the header itself cannot be decoded
    pub async fn open(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .create_reader(reader);

        let columns = {
            let headers = csv_reader.headers().await?;
            ColumnIndex::from_headers(headers.iter())?
        };

        Ok(Self {
            csv_reader,
            columns,
            record: StringRecord::new(),
            next_row_number: FIRST_DATA_ROW,
        })
    }

    /// Read the next data row
    ///
    /// # Returns
    ///
    /// * `Ok(Some((row_number, RawRow)))` - Next record
    /// * `Ok(None)` - End of input
    /// * `Err(ImportError)` - Malformed CSV or invalid UTF-8
    pub async fn next_row(&mut self) -> Result<Option<(u64, RawRow)>, ImportError> {
        let row_number = self.next_row_number;

        let has_record = self
            .csv_reader
            .read_record(&mut self.record)
            .await
            .map_err(|e| with_line(e.into(), row_number))?;

        if !has_record {
            return Ok(None);
        }

        self.next_row_number += 1;
        Ok(Some((row_number, self.columns.extract(self.record.iter()))))
    }
}

// Attach the row number when the CSV error did not carry a position
fn with_line(error: ImportError, row_number: u64) -> ImportError {
    match error {
        ImportError::ParseError {
            line: None,
            message,
        } => ImportError::ParseError {
            line: Some(row_number),
            message,
        },
        ImportError::InvalidEncoding { line: None } => ImportError::InvalidEncoding {
            line: Some(row_number),
        },
        other => other,
    }
}
