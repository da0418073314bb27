use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Every failure is fatal to the running job; nothing here is retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("no page indicator on {url}; cannot determine page count")]
    PageIndicatorMissing { url: String },

    #[error("unexpected page structure: {0}")]
    PageStructure(String),

    #[error("listing file {} not found (run `list` first)", .0.display())]
    InputFileMissing(PathBuf),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
