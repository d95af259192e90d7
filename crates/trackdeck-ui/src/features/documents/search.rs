//! Document search form state.

use thiserror::Error;
use tracing::debug;

/// Shortest query the backend accepts.
pub const MIN_QUERY_CHARS: usize = 2;

/// Reasons a query was not submitted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Nothing but whitespace.
    #[error("Enter a search term")]
    Empty,
    /// Fewer than [`MIN_QUERY_CHARS`] characters after trimming.
    #[error("Search terms must be at least {MIN_QUERY_CHARS} characters")]
    TooShort,
}

/// Query text plus the last validation error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    query: String,
    error: Option<SearchError>,
}

impl SearchForm {
    /// Replace the query text; clears a stale validation error.
    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.query);
        self.error = None;
    }

    /// Current raw query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Validation error from the last submit.
    #[must_use]
    pub const fn error(&self) -> Option<SearchError> {
        self.error
    }

    /// Validate and return the trimmed query to search for.
    ///
    /// # Errors
    ///
    /// [`SearchError::Empty`] or [`SearchError::TooShort`]; the error is also
    /// kept for rendering.
    pub fn submit(&mut self) -> Result<String, SearchError> {
        let trimmed = self.query.trim();
        let outcome = if trimmed.is_empty() {
            Err(SearchError::Empty)
        } else if trimmed.chars().count() < MIN_QUERY_CHARS {
            Err(SearchError::TooShort)
        } else {
            Ok(trimmed.to_string())
        };
        self.error = outcome.as_ref().err().copied();
        debug!(accepted = outcome.is_ok(), "document search submitted");
        outcome
    }
}

/// Label for the indexed-document badge.
#[must_use]
pub fn document_count_label(count: Option<u64>) -> String {
    match count {
        None => "Counting documents…".to_string(),
        Some(1) => "1 document indexed".to_string(),
        Some(count) => format!("{count} documents indexed"),
    }
}
