//! Request handlers
//!
//! Upload goes through the import pipeline inside one store transaction;
//! export and sample downloads bypass validation and write CSV directly.

use crate::core::import_csv;
use crate::io::{export_csv, sample_csv};
use crate::types::ImportError;
use crate::web::error::WebError;
use crate::web::render::LATEST_LIMIT;
use crate::web::AppState;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use futures::io::Cursor;
use tracing::info;

/// Multipart field carrying the uploaded CSV
pub const FILE_FIELD: &str = "file";

pub const SAMPLE_FILE_NAME: &str = "sample_customers.csv";
pub const EXPORT_FILE_NAME: &str = "customers_export.csv";

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// GET / - latest records
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let rows = state.store.list_latest(LATEST_LIMIT).await?;
    Ok(Html(state.views.index(&rows, None)?))
}

/// GET /sample - fixed example file
pub async fn sample() -> Response {
    csv_attachment(SAMPLE_FILE_NAME, Bytes::from_static(sample_csv()))
}

/// GET /export - every stored record, ascending id
pub async fn export(State(state): State<AppState>) -> Result<Response, WebError> {
    let records = state.store.list_all().await?;
    let body = export_csv(&records)?;
    info!(records = records.len(), "export generated");
    Ok(csv_attachment(EXPORT_FILE_NAME, Bytes::from(body)))
}

/// POST /upload - import a CSV and show the summary
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, WebError> {
    let mut multipart = multipart.map_err(|_| ImportError::MissingFile)?;
    let (file_name, body) = read_csv_upload(&mut multipart).await?;
    info!(file_name = %file_name, bytes = body.len(), "upload received");

    let mut batch = state.store.begin_import().await?;
    let summary = import_csv(Cursor::new(body), &mut batch).await?;
    batch.commit().await?;

    let rows = state.store.list_latest(LATEST_LIMIT).await?;
    Ok(Html(state.views.index(&rows, Some(&summary))?))
}

/// GET /health - liveness
pub async fn health() -> &'static str {
    "OK"
}

/// Find the `file` field, check its name, and read its body
async fn read_csv_upload(multipart: &mut Multipart) -> Result<(String, Bytes), WebError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A plain form value named `file` is not a file part
        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or(ImportError::MissingFile)?;

        if !is_csv_file_name(&file_name) {
            return Err(ImportError::InvalidExtension.into());
        }

        let body = field.bytes().await?;
        return Ok((file_name, body));
    }

    Err(ImportError::MissingFile.into())
}

/// Non-empty and ending in `.csv`, case-insensitive
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".csv")
}

fn csv_attachment(file_name: &str, body: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}
