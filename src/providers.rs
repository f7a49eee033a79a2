//! Listing sources feeding the browser.
//!
//! A source is the boundary where raw listing rows become [`Entry`] values.
//! It owns the trailing-`/` naming convention, so the rest of the crate only
//! ever sees well-formed entries and dispatches on their variant.

pub mod filesystem;
pub mod manifest;

use std::fmt;

use async_trait::async_trait;

use crate::entries::Entry;

/// Error reported by a listing source.
#[derive(Debug, Clone)]
pub struct SourceError {
    code: String,
    message: String,
}

impl SourceError {
    pub fn new<C: Into<String>, M: Into<String>>(code: C, message: M) -> SourceError {
        SourceError {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SourceError {}

/// Produces the immediate children of a prefix.
#[async_trait]
pub trait EntrySource {
    /// Lists the entries directly under `prefix`, which is either empty or
    /// ends with `/`.
    async fn list(&self, prefix: &str) -> Result<Vec<Entry>, SourceError>;

    /// Name of the browsed resource (bucket, username, ...) for pane titles.
    fn resource_name(&self) -> &str;

    /// Short name of the backing provider for pane titles.
    fn provider_name(&self) -> &str;
}
