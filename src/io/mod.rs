//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (header normalization, export, sample file)
//! - `upload_reader` - Asynchronous reader over an uploaded CSV

pub mod csv_format;
pub mod upload_reader;

pub use csv_format::{export_csv, sample_csv, write_customers_csv, ColumnIndex};
pub use upload_reader::UploadReader;
