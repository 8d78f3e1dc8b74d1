//! Core business logic module
//!
//! This module contains the import components:
//! - `traits` - The insert seam shared by the store and its import batches
//! - `validator` - Pure row validation
//! - `store` - SQLite-backed customer storage
//! - `importer` - Upload orchestration producing an import summary

pub mod importer;
pub mod store;
pub mod traits;
pub mod validator;

pub use importer::import_csv;
pub use store::{CustomerStore, ImportBatch, StoreConfig};
pub use traits::CustomerSink;
pub use validator::validate;
