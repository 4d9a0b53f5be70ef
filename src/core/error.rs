// src/core/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Why one page could not be fetched or read.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("missing `{selector}` on {url}")]
    Missing { url: String, selector: String },

    #[error("invalid selector `{0}`")]
    Selector(String),
}

impl ScrapeError {
    pub fn missing(url: &str, selector: &str) -> Self {
        ScrapeError::Missing { url: s!(url), selector: s!(selector) }
    }
}

/// Why the sheets could not be written. Export failures end the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
