//! Error types for the artist graph pipeline and the catalog client

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a [`crate::catalog::CatalogClient`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no catalog match for '{0}'")]
    NotFound(String),

    #[error("rate limited by catalog (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("transient catalog failure: {0}")]
    Transient(String),

    #[error("catalog rejected credentials: {0}")]
    Unauthorized(String),

    #[error("missing catalog credential: set {0}")]
    MissingCredentials(&'static str),

    #[error("unexpected catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Errors that will fail every remaining lookup, not just the current one
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CatalogError::Unauthorized(_) | CatalogError::MissingCredentials(_)
        )
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transient(err.to_string())
        }
    }
}

/// Errors raised while extracting, building or serializing the graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// The input file lacks the artist column. Fatal.
    #[error("{path}: required column '{column}' not found in header")]
    InputFormat { path: PathBuf, column: String },

    /// A seed artist could not be enriched. Logged, never fatal.
    #[error("could not resolve artist '{name}': {source}")]
    ArtistResolution {
        name: String,
        #[source]
        source: CatalogError,
    },

    /// The catalog refused access altogether. Fatal.
    #[error("catalog refused access while resolving '{name}': {source}")]
    CatalogAccess {
        name: String,
        #[source]
        source: CatalogError,
    },

    /// An edge points at a name missing from the node table. Fatal.
    #[error("artist '{artist}' references '{reference}', which is not a node")]
    UnresolvedReference { artist: String, reference: String },

    #[error("malformed csv at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Name of the artist a resolution failure belongs to
    pub fn artist_name(&self) -> Option<&str> {
        match self {
            GraphError::ArtistResolution { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_message() {
        let err = GraphError::ArtistResolution {
            name: "Nobody".into(),
            source: CatalogError::NotFound("Nobody".into()),
        };
        assert_eq!(err.artist_name(), Some("Nobody"));
        assert!(err.to_string().contains("no catalog match for 'Nobody'"));
    }

    #[test]
    fn test_input_format_message() {
        let err = GraphError::InputFormat {
            path: PathBuf::from("nodes.csv"),
            column: "Artist".into(),
        };
        assert_eq!(
            err.to_string(),
            "nodes.csv: required column 'Artist' not found in header"
        );
        assert_eq!(err.artist_name(), None);
    }

    #[test]
    fn test_fatal_catalog_errors() {
        assert!(CatalogError::Unauthorized("401".into()).is_fatal());
        assert!(CatalogError::MissingCredentials("SPOTIPY_CLIENT_ID").is_fatal());
        assert!(!CatalogError::NotFound("A".into()).is_fatal());
        assert!(!CatalogError::RateLimited { retry_after: None }.is_fatal());
        assert!(!CatalogError::Transient("502".into()).is_fatal());
    }
}
