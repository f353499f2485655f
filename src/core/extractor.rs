//! Seed artist extraction from a tabular dataset

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

use crate::config::UserConfig;
use crate::errors::{GraphError, GraphResult};
use crate::models::SeedSet;
use crate::utils::csv::CsvReader;
use crate::utils::parsers::main_artist;

/// Reads the artist credit column and collects unique main artists
pub struct ArtistExtractor {
    column: String,
}

impl ArtistExtractor {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(config.artist_column.clone())
    }

    /// Extract seed artists from a CSV file
    pub fn extract_path(&self, path: &Path) -> GraphResult<SeedSet> {
        let reader = CsvReader::from_path(path)?;
        self.extract(reader, path)
    }

    /// Extract seed artists from an open CSV stream. `source` only labels errors.
    pub fn extract<R: BufRead>(&self, mut reader: CsvReader<R>, source: &Path) -> GraphResult<SeedSet> {
        let headers = reader.headers()?;
        let column = headers
            .iter()
            .position(|h| *h == self.column)
            .ok_or_else(|| GraphError::InputFormat {
                path: source.to_path_buf(),
                column: self.column.clone(),
            })?;

        let mut credits: HashSet<String> = HashSet::new();
        while let Some(mut record) = reader.read_record()? {
            if column >= record.len() || record[column].is_empty() {
                debug!("line {}: empty artist cell, skipping", reader.line());
                continue;
            }
            credits.insert(record.swap_remove(column));
        }
        info!(
            "Number of unique artists (including features): {}",
            credits.len()
        );

        let seeds: SeedSet = credits.iter().map(|credit| main_artist(credit)).collect();
        info!(
            "Number of unique artists after removing features: {}",
            seeds.len()
        );

        Ok(seeds)
    }
}
