//! Catalog entity models

use serde::{Deserialize, Serialize};

/// Artist entity as returned by the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub followers: Followers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: Option<u64>,
}

/// `GET /search?type=artist` response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub artists: ArtistPage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistPage {
    #[serde(default)]
    pub items: Vec<CatalogArtist>,
}

/// `GET /artists/{id}/related-artists` response
#[derive(Debug, Deserialize)]
pub struct RelatedArtistsResponse {
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
}
