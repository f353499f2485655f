//! End-to-end run: extract, enrich, serialize

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{ArtistExtractor, EnrichmentReport, GraphBuilder, GraphSerializer};
use crate::catalog::CatalogClient;
use crate::config::UserConfig;

/// What a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub artists: usize,
    pub edges: usize,
    pub report: EnrichmentReport,
}

/// Run the whole pipeline against the given catalog
pub async fn run(config: &UserConfig, catalog: &dyn CatalogClient) -> Result<RunSummary> {
    info!("Parsing unique artists from {}", config.input.display());
    let mut seeds = ArtistExtractor::from_config(config)
        .extract_path(&config.input)
        .with_context(|| format!("Failed to extract artists from {}", config.input.display()))?;
    if seeds.is_empty() {
        warn!("No artists found in {}", config.input.display());
    }

    info!("Beginning to update artists");
    let report = GraphBuilder::from_config(catalog, config)
        .enrich(&mut seeds)
        .await
        .context("Catalog lookups aborted")?;

    info!("Writing files");
    let tables = GraphSerializer::from_config(config)
        .write_files(&seeds, &config.nodes_output, &config.edges_output)
        .context("Failed to write graph tables")?;
    info!("Done writing");

    Ok(RunSummary {
        artists: tables.nodes.len(),
        edges: tables.edges.len(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::tests::StubCatalog;
    use crate::errors::{CatalogError, GraphError};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, input: &str) -> UserConfig {
        let input_path = dir.path().join("songs.csv");
        std::fs::write(&input_path, input).unwrap();

        let mut config = UserConfig::default();
        config.input = input_path;
        config.nodes_output = dir.path().join("nodes_out.csv");
        config.edges_output = dir.path().join("edges_out.csv");
        config.show_progress = false;
        config
    }

    #[tokio::test]
    async fn test_full_run() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "Rank,Artist\n1,\"A, B\"\n2,C\n3,A\n");
        config.related_artist_column = false;
        let catalog = StubCatalog::default()
            .artist("A", &["pop"], 10)
            .artist("C", &[], 4)
            .related("A", &["C", "X"])
            .related("C", &["A"]);

        let summary = run(&config, &catalog).await.unwrap();

        assert_eq!(summary.artists, 2);
        assert_eq!(summary.edges, 2);
        assert_eq!(
            std::fs::read_to_string(&config.nodes_output).unwrap(),
            "Id,Artist,Genres,Followers\n0,A,pop,10\n1,C,,4\n"
        );
        assert_eq!(
            std::fs::read_to_string(&config.edges_output).unwrap(),
            "Source,Target,Type,Weight\n0,1,Undirected,1\n1,0,Undirected,1\n"
        );
    }

    #[tokio::test]
    async fn test_minimal_run_with_failures() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "Artist\nA\nB\nC\n");
        config.use_minimal_schema();
        let catalog = StubCatalog::default()
            .artist("A", &[], 1)
            .artist("C", &[], 1)
            .related("A", &["C"])
            .failing_search("B", CatalogError::Transient("timed out".into()));

        let summary = run(&config, &catalog).await.unwrap();

        assert_eq!(summary.artists, 3);
        assert_eq!(summary.report.failed_artists(), vec!["B"]);
        assert_eq!(
            std::fs::read_to_string(&config.nodes_output).unwrap(),
            "Id,Artist\n0,A\n1,B\n2,C\n"
        );
        assert_eq!(
            std::fs::read_to_string(&config.edges_output).unwrap(),
            "Source,Target,Type,Weight\nA,C,Undirected,1\n"
        );
    }

    #[tokio::test]
    async fn test_missing_column_aborts_before_output() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "Title\nSong\n");

        let err = run(&config, &StubCatalog::default()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::InputFormat { .. })
        ));
        assert!(!config.nodes_output.exists());
        assert!(!config.edges_output.exists());
    }

    #[tokio::test]
    async fn test_rejected_credentials_write_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "Artist
A
B
");
        let denied = CatalogError::Unauthorized("token request rejected (400 Bad Request)".into());
        let catalog = StubCatalog::default()
            .failing_search("A", denied.clone())
            .failing_search("B", denied);

        let err = run(&config, &catalog).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::CatalogAccess {
                source: CatalogError::Unauthorized(_),
                ..
            })
        ));
        assert!(!config.nodes_output.exists());
        assert!(!config.edges_output.exists());
    }
}
