//! Error types shared by the paging engine and the subgraph client

use std::time::Duration;

/// Failure of a single upstream round trip
#[derive(Debug)]
pub enum UpstreamError {
    /// Network failure or client construction failure
    Transport(reqwest::Error),
    /// Upstream answered with a non-success HTTP status
    Status(u16),
    /// Upstream answered with a GraphQL `errors` array
    GraphQl(Vec<String>),
    /// Response had no records for the requested collection
    MissingData(String),
    /// Records could not be decoded into the expected shape
    Decode(serde_json::Error),
    /// Upstream returned more records than requested
    OversizePage { page_size: usize, received: usize },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err)
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Decode(err)
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Transport(e) => write!(f, "Transport error: {}", e),
            UpstreamError::Status(code) => write!(f, "Upstream returned HTTP {}", code),
            UpstreamError::GraphQl(messages) => {
                write!(f, "GraphQL error: {}", messages.join("; "))
            }
            UpstreamError::MissingData(collection) => {
                write!(f, "Response is missing data for '{}'", collection)
            }
            UpstreamError::Decode(e) => write!(f, "Decode error: {}", e),
            UpstreamError::OversizePage { page_size, received } => write!(
                f,
                "Upstream returned {} records for a page of {}",
                received, page_size
            ),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport(e) => Some(e),
            UpstreamError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure of a whole paginated query
///
/// No partial aggregate ever accompanies an error.
#[derive(Debug)]
pub enum QueryError {
    Upstream(UpstreamError),
    /// The request deadline elapsed before pagination finished
    Cancelled(Duration),
}

impl From<UpstreamError> for QueryError {
    fn from(err: UpstreamError) -> Self {
        QueryError::Upstream(err)
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Upstream(e) => write!(f, "Upstream error: {}", e),
            QueryError::Cancelled(limit) => {
                write!(f, "Query cancelled after {}ms", limit.as_millis())
            }
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Upstream(e) => Some(e),
            QueryError::Cancelled(_) => None,
        }
    }
}
