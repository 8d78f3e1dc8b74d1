//! Customer CSV Import server
//!
//! Serves the upload form, imports CSV files into SQLite, and offers export
//! and sample downloads.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --db-path ./data/app.db
//! DB_PATH=/data/app.db BIND_ADDR=0.0.0.0:8080 cargo run
//! RUST_LOG=debug cargo run -- --max-upload-bytes 1048576
//! ```
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown
//! - 1: Startup or serving error (database unreachable, address in use, etc.)

use customer_csv_import::{cli, web, CustomerStore};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Configuration is read once, here
    let args = cli::parse_args();
    let store_config = args.to_store_config();
    let server_config = args.to_server_config();

    let store = match CustomerStore::connect(&store_config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to open customer store");
            process::exit(1);
        }
    };

    if let Err(e) = web::serve(&server_config, store).await {
        tracing::error!(error = %e, "server error");
        process::exit(1);
    }
}
