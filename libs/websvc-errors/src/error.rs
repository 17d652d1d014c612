use std::path::PathBuf;

use crate::paths::HomeDirError;

/// Fatal failure to obtain the error catalog.
///
/// Raised at startup; there is no per-request fallback for a missing or
/// malformed catalog.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Neither the live nor the shipped catalog exists in the directory
    #[error("errors file does not exist in '{}'", dir.display())]
    CatalogNotFound { dir: PathBuf },

    /// The catalog file exists but could not be read
    #[error("errors file '{}' is unreadable: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a well-formed catalog document
    #[error("errors file '{}' cannot be decoded: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configured directory could not be normalized
    #[error("invalid configuration directory: {0}")]
    InvalidDirectory(#[from] HomeDirError),
}
