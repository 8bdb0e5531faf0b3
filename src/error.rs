pub use anyhow::{anyhow, Result};

use std::path::PathBuf;

use thiserror::Error as TError;

#[derive(Debug, TError)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} (document {document}): {source}")]
    Parse {
        path: PathBuf,
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid Gateway spec {name} in {path}: {source}")]
    InvalidSpec {
        name: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate Gateway {name} in {path} (first defined in {first})")]
    Duplicate {
        name: String,
        path: PathBuf,
        first: PathBuf,
    },
}
