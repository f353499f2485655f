//! Music catalog access
//!
//! The graph builder only sees the [`CatalogClient`] trait. A client handle is
//! constructed once in `main` and passed in, so tests can substitute a stub.

mod credentials;
mod spotify;

pub use credentials::Credentials;
pub use spotify::SpotifyClient;

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::models::CatalogArtist;

/// Name and relationship lookups against an external artist catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Resolve a name to the catalog's top search result
    async fn search_artist(&self, name: &str) -> Result<CatalogArtist, CatalogError>;

    /// Artists the catalog considers related to `artist_id`
    async fn related_artists(&self, artist_id: &str) -> Result<Vec<CatalogArtist>, CatalogError>;
}
