// Error type shared by every module of the library. The binary wraps it in
// `anyhow` at the top level; inside the crate we keep the variants typed so
// the orchestrator can tell fatal search errors from per-image failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (e.g. no access key).
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected user input. Prompts show this inline and ask again.
    #[error("{0}")]
    Validation(String),

    /// The search endpoint answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("unexpected response shape: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to start download workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn network(url: &str, reason: impl ToString) -> Self {
        Error::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
