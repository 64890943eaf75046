use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    PageNotFound(String),

    #[error("Unable to access {url} (status {status})")]
    PageNotAccessible { url: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, ScanError>;
