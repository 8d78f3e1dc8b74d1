//! CSV import pipeline
//!
//! This module orchestrates one upload: it reads the header through the
//! UploadReader, runs each row through the validator, and hands valid rows
//! to a [`CustomerSink`].
//!
//! # Error Handling
//!
//! - Header errors fail before any row is read
//! - Validation failures and duplicate emails are recorded in the summary
//!   and processing continues with the next row
//! - Malformed CSV and storage failures abort the whole import
//!
//! Committing is the caller's business: with an [`ImportBatch`] nothing is
//! durable until the caller commits, so an aborted import leaves no trace.
//!
//! [`ImportBatch`]: crate::core::store::ImportBatch

use crate::core::traits::CustomerSink;
use crate::core::validator::validate;
use crate::io::UploadReader;
use crate::types::{ImportError, ImportSummary};
use futures::io::AsyncRead;
use tracing::{debug, info};

/// Import every row of an uploaded CSV into `sink`
///
/// # Arguments
///
/// * `input` - Upload body (UTF-8 CSV with a header row)
/// * `sink` - Destination for validated customers
///
/// # Returns
///
/// * `Ok(ImportSummary)` - Count of inserted rows plus per-row errors in file order
/// * `Err(ImportError)` - Header, CSV structure or storage failure
pub async fn import_csv<R, S>(input: R, sink: &mut S) -> Result<ImportSummary, ImportError>
where
    R: AsyncRead + Unpin + Send,
    S: CustomerSink + ?Sized,
{
    let mut reader = UploadReader::open(input).await?;
    let mut summary = ImportSummary::default();

    while let Some((row_number, raw)) = reader.next_row().await? {
        let customer = match validate(&raw) {
            Ok(customer) => customer,
            Err(e) => {
                debug!(row = row_number, reason = %e, "row rejected");
                summary.record_error(row_number, e.to_string());
                continue;
            }
        };

        match sink.insert(&customer).await {
            Ok(_) => summary.record_success(),
            Err(e @ ImportError::DuplicateEmail { .. }) => {
                debug!(row = row_number, email = %customer.email, "duplicate email");
                summary.record_error(row_number, e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        ok = summary.ok,
        errors = summary.error_count(),
        "import finished"
    );

    Ok(summary)
}
