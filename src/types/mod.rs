//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `customer`: Stored records, validated candidates and raw CSV rows
//! - `summary`: Per-import tally of successes and row errors
//! - `error`: Error types for the importer

pub mod customer;
pub mod error;
pub mod summary;

pub use customer::{CustomerId, CustomerRecord, NewCustomer, RawRow, CREATED_AT_FORMAT};
pub use error::{ImportError, ValidationError};
pub use summary::{ImportSummary, RowError};
