//! Core pipeline stages

pub mod builder;
pub mod extractor;
pub mod pipeline;
pub mod serializer;

pub use builder::{EnrichmentReport, GraphBuilder};
pub use extractor::ArtistExtractor;
pub use serializer::GraphSerializer;
