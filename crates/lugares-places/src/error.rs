use thiserror::Error;

/// Failure of a place search.
///
/// The catalog stub never produces one; real backends do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search backend unavailable: {0}")]
    Unavailable(String),

    #[error("search backend returned an invalid response: {0}")]
    InvalidResponse(String),
}
