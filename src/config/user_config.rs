//! User configuration for artistgraph
//!
//! This module handles the pipeline settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Paths;
use crate::models::{EdgeEndpoints, NodeSchema};

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Dataset holding the artist credits
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Header of the artist credit column
    #[serde(default = "default_artist_column")]
    pub artist_column: String,

    /// Node table destination
    #[serde(default = "default_nodes_output")]
    pub nodes_output: PathBuf,

    /// Edge table destination
    #[serde(default = "default_edges_output")]
    pub edges_output: PathBuf,

    /// Emit Genres and Followers columns
    #[serde(default = "default_true")]
    pub node_attributes: bool,

    /// Emit the Related Artist column (needs node_attributes)
    #[serde(default = "default_true")]
    pub related_artist_column: bool,

    /// Whether edges reference node ids or artist names
    #[serde(default)]
    pub edge_endpoints: EdgeEndpoints,

    /// Artists enriched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout for catalog calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Draw a progress bar during enrichment
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Catalog web API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Catalog token service root
    #[serde(default = "default_accounts_base_url")]
    pub accounts_base_url: String,

    /// Client id, overridden by SPOTIPY_CLIENT_ID
    #[serde(default)]
    pub client_id: String,

    /// Client secret, overridden by SPOTIPY_CLIENT_SECRET
    #[serde(default)]
    pub client_secret: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            artist_column: default_artist_column(),
            nodes_output: default_nodes_output(),
            edges_output: default_edges_output(),
            node_attributes: true,
            related_artist_column: true,
            edge_endpoints: EdgeEndpoints::Id,
            concurrency: default_concurrency(),
            request_timeout_secs: default_request_timeout(),
            show_progress: true,
            api_base_url: default_api_base_url(),
            accounts_base_url: default_accounts_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the settings file, writing defaults if absent
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            let config = Self::default();
            config.save_to(&settings_path)?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Switch to the plain variant: `Id, Artist` nodes and name-keyed edges
    pub fn use_minimal_schema(&mut self) {
        self.node_attributes = false;
        self.related_artist_column = false;
        self.edge_endpoints = EdgeEndpoints::Name;
    }

    /// Node table layout implied by the attribute flags
    pub fn node_schema(&self) -> NodeSchema {
        match (self.node_attributes, self.related_artist_column) {
            (false, _) => NodeSchema::Minimal,
            (true, false) => NodeSchema::Attributes,
            (true, true) => NodeSchema::AttributesWithRelated,
        }
    }

    /// Concurrency clamped to at least one artist in flight
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_input() -> PathBuf {
    PathBuf::from("nodes.csv")
}

fn default_artist_column() -> String {
    "Artist".to_string()
}

fn default_nodes_output() -> PathBuf {
    PathBuf::from("nodes_and_attributes_updated.csv")
}

fn default_edges_output() -> PathBuf {
    PathBuf::from("edges_updated.csv")
}

fn default_concurrency() -> usize {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_api_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_accounts_base_url() -> String {
    "https://accounts.spotify.com".to_string()
}
