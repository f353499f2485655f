//! Data models for the artist graph
//!
//! Seed records, catalog entities and the rows of the emitted tables.

mod artist;
mod catalog;
mod graph;

pub use artist::SeedSet;
pub use catalog::{CatalogArtist, RelatedArtistsResponse, SearchResponse};
#[cfg(test)]
pub use catalog::Followers;
pub use graph::{EdgeEndpoints, EdgeRow, NodeRow, NodeSchema, EDGE_HEADER};
