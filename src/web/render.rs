//! HTML rendering
//!
//! The home page and the upload result share one Tera template. Templates
//! registered under a `.html` name are auto-escaped, so every user-supplied
//! value (names, emails, error messages) is rendered as text, never markup.

use crate::types::{CustomerRecord, ImportError, ImportSummary};
use tera::{Context, Tera};

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Number of records shown in the "latest records" table
pub const LATEST_LIMIT: u32 = 50;

/// Compiled page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compile the embedded templates
    pub fn new() -> Result<Self, ImportError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render the page: the latest records, plus the import summary after an upload
    pub fn index(
        &self,
        rows: &[CustomerRecord],
        summary: Option<&ImportSummary>,
    ) -> Result<String, ImportError> {
        let mut context = Context::new();
        context.insert("rows", rows);
        context.insert("summary", &summary);
        context.insert("limit", &LATEST_LIMIT);

        Ok(self.tera.render(INDEX_TEMPLATE_NAME, &context)?)
    }
}
