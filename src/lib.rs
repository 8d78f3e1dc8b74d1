//! Customer CSV Import Library
//! # Overview
//!
//! This library provides a small web application that imports customer
//! records from uploaded CSV files into SQLite, shows the latest records,
//! and exports the table back to CSV.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (CustomerRecord, ImportSummary, errors)
//! - [`cli`] - Command-line and environment configuration
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Row validation (name, email, age)
//!   - [`core::store`] - The customers table and transactional import batches
//!   - [`core::importer`] - Upload orchestration producing an import summary
//! - [`io`] - CSV reading (uploads) and writing (export, sample file)
//! - [`web`] - HTTP routes, HTML rendering and error mapping
//!
//! # Import Flow
//!
//! An upload runs Import Pipeline → Validator (per row) → Store (per valid
//! row) inside one transaction that commits at the end, then renders the
//! summary with the latest records. Export and sample downloads bypass
//! validation.
//!
//! # Row Rules
//!
//! - `name`: trimmed, at least 2 characters
//! - `email`: trimmed, lower-cased, `local@domain.tld`, unique
//! - `age`: integer in 1-120

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;
pub mod web;

pub use core::{import_csv, validate, CustomerSink, CustomerStore, ImportBatch, StoreConfig};
pub use io::{export_csv, sample_csv};
pub use types::{
    CustomerId, CustomerRecord, ImportError, ImportSummary, NewCustomer, RawRow, RowError,
    ValidationError,
};
pub use web::{router, AppState, ServerConfig};
