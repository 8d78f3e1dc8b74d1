//! Error types for the CSV importer
//!
//! This module defines the errors that can occur while handling an upload,
//! talking to the store or rendering a response, plus the row-level
//! validation errors that end up in an import summary.
//!
//! # Error Categories
//!
//! - **Request Errors**: Missing file, wrong extension, missing header columns,
//!   malformed or non-UTF-8 CSV. Reported as HTTP 400, no state change.
//! - **Row Errors**: Validation failures and duplicate emails. Recorded in the
//!   summary, the import continues.
//! - **Fatal Errors**: Storage, I/O and rendering failures. Abort the request.

use thiserror::Error;

/// Main error type for the importer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// The multipart form has no `file` field
    #[error("No file part")]
    MissingFile,

    /// The uploaded file name is empty or does not end in `.csv`
    #[error("Please upload a .csv file")]
    InvalidExtension,

    /// One of `name`, `email` or `age` is absent from the header row
    ///
    /// Raised before any row is read, so no partial import occurs.
    #[error("Header must include: name,email,age")]
    MissingHeaderColumns,

    /// The upload is not valid UTF-8 text
    #[error("File must be UTF-8 encoded{}", line.map(|l| format!(" (line {})", l)).unwrap_or_default())]
    InvalidEncoding {
        /// Line where decoding failed (if known)
        line: Option<u64>,
    },

    /// CSV structure could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Insert rejected by the unique constraint on `email`
    ///
    /// This is a row-level error: the importer records it and moves on.
    #[error("duplicate email (already imported)")]
    DuplicateEmail {
        /// The email that already exists
        email: String,
    },

    /// Any storage failure other than the unique-email violation
    #[error("Storage error: {message}")]
    StorageError {
        /// Description of the storage failure
        message: String,
    },

    /// I/O error (creating the database directory, binding the listener, ...)
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// HTML template failed to render
    #[error("Render error: {message}")]
    RenderError {
        /// Description of the rendering failure
        message: String,
    },
}

impl ImportError {
    /// Whether this error is the client's fault and maps to HTTP 400
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            ImportError::MissingFile
                | ImportError::InvalidExtension
                | ImportError::MissingHeaderColumns
                | ImportError::InvalidEncoding { .. }
                | ImportError::ParseError { .. }
        )
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email(email: &str) -> Self {
        ImportError::DuplicateEmail {
            email: email.to_string(),
        }
    }

    /// Create a StorageError
    pub fn storage(message: impl Into<String>) -> Self {
        ImportError::StorageError {
            message: message.into(),
        }
    }
}

/// Row-level validation failure
///
/// The display strings are shown verbatim in the import summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be at least 2 characters")]
    NameTooShort,

    #[error("invalid email")]
    InvalidEmail,

    #[error("age must be an integer 1-120")]
    InvalidAge,
}

// Conversion from io::Error to ImportError
impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        ImportError::IoError {
            message: error.to_string(),
        }
    }
}

// Unique violations are the only storage failure the importer recovers from
impl From<sqlx::Error> for ImportError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ImportError::DuplicateEmail {
                    email: String::new(),
                }
            }
            _ => ImportError::StorageError {
                message: error.to_string(),
            },
        }
    }
}

// Conversion from csv::Error to ImportError (export writer)
impl From<csv::Error> for ImportError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ImportError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from csv_async::Error to ImportError (upload reader)
impl From<csv_async::Error> for ImportError {
    fn from(error: csv_async::Error) -> Self {
        match error.kind() {
            csv_async::ErrorKind::Utf8 { pos, .. } => ImportError::InvalidEncoding {
                line: pos.as_ref().map(|p| p.line()),
            },
            csv_async::ErrorKind::Io(e) => ImportError::IoError {
                message: e.to_string(),
            },
            _ => ImportError::ParseError {
                line: None,
                message: error.to_string(),
            },
        }
    }
}

impl From<tera::Error> for ImportError {
    fn from(error: tera::Error) -> Self {
        ImportError::RenderError {
            message: error.to_string(),
        }
    }
}
