use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};

/// A fetched page. Created per fetch and discarded after parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Resolved address the page was fetched from (scheme-corrected if needed).
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gate on the response status: 404 is a distinct not-found condition,
    /// any other non-success status is an access failure.
    pub fn ensure_accessible(&self) -> Result<()> {
        if self.status_code == 404 {
            return Err(ScanError::PageNotFound(self.url.clone()));
        }
        if !self.is_success() {
            return Err(ScanError::PageNotAccessible {
                url: self.url.clone(),
                status: self.status_code,
            });
        }
        Ok(())
    }
}
