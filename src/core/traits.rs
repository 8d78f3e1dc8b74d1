//! Core trait for record insertion
//!
//! The import pipeline only needs to insert validated customers; it does not
//! care whether each insert autocommits or joins a surrounding transaction.
//! Both the store and its transactional import batch implement this seam.

use crate::types::{CustomerId, ImportError, NewCustomer};
use async_trait::async_trait;

/// Destination for validated customers
#[async_trait]
pub trait CustomerSink: Send {
    /// Insert a new customer, returning its store-assigned id
    ///
    /// Fails with `ImportError::DuplicateEmail` when the email already exists
    /// (the existing record is left untouched). Any other failure is fatal.
    async fn insert(&mut self, customer: &NewCustomer) -> Result<CustomerId, ImportError>;
}
