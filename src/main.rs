//! artistgraph - related-artist graphs from a dataset of artist credits
//!
//! Reads the `Artist` column of a CSV dataset, looks every main artist up in
//! the Spotify catalog and writes node and edge tables for graph tools such
//! as Gephi.

mod catalog;
mod config;
mod core;
mod errors;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::catalog::{Credentials, SpotifyClient};
use crate::config::{Paths, UserConfig};

/// artistgraph - build a related-artist graph
#[derive(Parser, Debug)]
#[command(name = "artistgraph")]
#[command(version)]
#[command(about = "Builds node and edge CSVs of related artists from a dataset of artist credits")]
struct Args {
    /// CSV dataset with an Artist column
    #[arg(long)]
    input: Option<PathBuf>,

    /// Node table output path
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// Edge table output path
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Artists looked up at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    /// Write only Id and Artist nodes, with name-keyed edges
    #[arg(long)]
    minimal: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Command-line values win over the settings file
    fn apply(self, config: &mut UserConfig) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(nodes) = self.nodes {
            config.nodes_output = nodes;
        }
        if let Some(edges) = self.edges {
            config.edges_output = edges;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.minimal {
            config.use_minimal_schema();
        }
        if self.no_progress {
            config.show_progress = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("{},hyper=warn,reqwest=warn", log_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("artistgraph v{} starting...", env!("CARGO_PKG_VERSION"));

    let paths = Paths::init(args.config.clone())?;
    info!("Config directory: {:?}", paths.config_dir());

    let mut config = UserConfig::load()?;
    args.apply(&mut config);

    let credentials = Credentials::resolve(&config).context("Catalog credentials unavailable")?;
    let client = SpotifyClient::new(credentials, &config).context("Failed to build catalog client")?;

    let summary = core::pipeline::run(&config, &client).await?;

    if !summary.report.failures.is_empty() {
        warn!(
            "{} artists could not be fully enriched: {}",
            summary.report.failures.len(),
            summary.report.failed_artists().join(", ")
        );
    }
    info!(
        "Graph written: {} nodes, {} edges ({} artists resolved)",
        summary.artists, summary.edges, summary.report.resolved
    );

    Ok(())
}
