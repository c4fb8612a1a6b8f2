use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cross-origin policy for labs that talk to a browser frontend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed by the `hello` lab. `"*"` mirrors any origin.
    /// TOML: `cors.allow_origins`. Default: `["http://localhost:5173"]`.
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: default_allow_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    /// Directory receiving uploaded files. Created on demand.
    /// TOML: `uploads.upload_dir`. Default: `uploads`.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Largest accepted size of a single multipart part, in bytes.
    /// TOML: `uploads.max_part_size`. Default: 10 MiB.
    #[serde(default = "default_max_part_size")]
    pub max_part_size: usize,

    /// Write buffer used by the chunked strategy, in bytes.
    /// TOML: `uploads.chunk_size`. Default: 1 MiB.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Upper bound on a whole multipart request body, in bytes.
    /// TOML: `uploads.max_request_size`. Default: 64 MiB.
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_part_size: default_max_part_size(),
            chunk_size: default_chunk_size(),
            max_request_size: default_max_request_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemsConfig {
    /// Database URL for SQLite.
    /// TOML: `items.database_url`. Default: `sqlite://database.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log every SQL statement the pool executes.
    /// TOML: `items.echo`. Default: `true`.
    #[serde(default = "default_echo")]
    pub echo: bool,

    /// Drop the `item` table before recreating it on startup.
    /// TOML: `items.reset_on_startup`. Default: `false`.
    #[serde(default)]
    pub reset_on_startup: bool,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            echo: default_echo(),
            reset_on_startup: false,
        }
    }
}

fn default_allow_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_part_size() -> usize {
    10 * 1024 * 1024
}

fn default_chunk_size() -> usize {
    1024 * 1024
}

fn default_max_request_size() -> usize {
    64 * 1024 * 1024
}

fn default_database_url() -> String {
    "sqlite://database.db".to_string()
}

fn default_echo() -> bool {
    true
}
