//! Customer-related types for the CSV importer
//!
//! This module defines the stored customer record, the validated candidate
//! handed to the store, and the raw row read from an uploaded CSV.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Store-assigned customer identifier
///
/// SQLite `INTEGER PRIMARY KEY AUTOINCREMENT`, monotonically increasing.
pub type CustomerId = i64;

/// Timestamp layout used in storage, export and the HTML table
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A customer as persisted in the `customers` table
///
/// `id` and `created_at` are always assigned by the store, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    /// Store-assigned identifier
    pub id: CustomerId,

    /// Trimmed name, at least 2 characters
    pub name: String,

    /// Trimmed, lower-cased email; unique across all records
    pub email: String,

    /// Age in the inclusive range 1-120
    pub age: i64,

    /// Insert time (UTC, second precision)
    #[serde(serialize_with = "serialize_created_at")]
    pub created_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// `created_at` rendered as `YYYY-MM-DDTHH:MM:SSZ`
    pub fn created_at_display(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}

fn serialize_created_at<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&value.format(CREATED_AT_FORMAT))
}

/// A customer candidate that passed validation
///
/// Only the validator produces these; the store turns them into
/// [`CustomerRecord`]s by assigning `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// One uploaded CSV row, reduced to the three columns the importer reads
///
/// Values are exactly as they appeared in the file (untrimmed). A column
/// missing from a short row reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub email: String,
    pub age: String,
}

impl RawRow {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: impl Into<String>) -> Self {
        RawRow {
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }
}
