use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("couldn't build table url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to fetch table page: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not find the results table, see '{}'", path.display())]
    ResultsTableNotFound { path: PathBuf },
    #[error("could not find the results table and failed to write '{}': {source}", path.display())]
    DebugPage {
        path: PathBuf,
        source: std::io::Error,
    },
}
