use crate::core::StoreConfig;
use crate::web::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Import customer records from uploaded CSV files
#[derive(Parser, Debug)]
#[command(name = "customer-csv-import")]
#[command(about = "Import customer records from uploaded CSV files", long_about = None)]
pub struct CliArgs {
    /// SQLite database file
    #[arg(
        long = "db-path",
        env = "DB_PATH",
        value_name = "PATH",
        default_value = "/data/app.db",
        help = "SQLite database file (created with its directory if missing)"
    )]
    pub db_path: PathBuf,

    /// Address the HTTP server listens on
    #[arg(
        long = "bind",
        env = "BIND_ADDR",
        value_name = "ADDR",
        default_value = "0.0.0.0:8080",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    /// Largest accepted request body
    #[arg(
        long = "max-upload-bytes",
        env = "MAX_UPLOAD_BYTES",
        value_name = "BYTES",
        help = "Largest accepted upload in bytes (default: 5 MiB)"
    )]
    pub max_upload_bytes: Option<usize>,

    /// Database connection pool size
    #[arg(
        long = "max-connections",
        env = "DB_MAX_CONNECTIONS",
        value_name = "COUNT",
        default_value_t = 5,
        help = "Maximum pooled database connections"
    )]
    pub max_connections: u32,
}

impl CliArgs {
    /// Storage settings handed to the store constructor
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            db_path: self.db_path.clone(),
            max_connections: self.max_connections.max(1),
        }
    }

    /// Listener settings
    ///
    /// A zero upload ceiling falls back to the default.
    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            max_upload_bytes: self
                .max_upload_bytes
                .filter(|bytes| *bytes > 0)
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}
