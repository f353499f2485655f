//! Graph serializer - node and edge tables
//!
//! Node ids are the 0-based rank of each name in lexicographic order, so the
//! same seed set always produces the same ids. Edges are materialized from each
//! artist's related set. Reciprocal relations are not merged: if A lists B and
//! B lists A, both rows are written.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::UserConfig;
use crate::errors::{GraphError, GraphResult};
use crate::models::{EdgeEndpoints, EdgeRow, NodeRow, NodeSchema, SeedSet, EDGE_HEADER};
use crate::utils::csv::CsvWriter;

/// Node and edge rows ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphTables {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

pub struct GraphSerializer {
    schema: NodeSchema,
    endpoints: EdgeEndpoints,
}

impl GraphSerializer {
    pub fn new(schema: NodeSchema, endpoints: EdgeEndpoints) -> Self {
        Self { schema, endpoints }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(config.node_schema(), config.edge_endpoints)
    }

    /// Assign ids and derive edges
    pub fn build_tables(&self, seeds: &SeedSet) -> GraphResult<GraphTables> {
        let names = seeds.sorted_names();
        let ids: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(id, name)| (*name, id))
            .collect();

        let mut tables = GraphTables::default();
        for (id, name) in names.iter().enumerate() {
            let Some(record) = seeds.get(name) else {
                continue;
            };

            tables.nodes.push(NodeRow {
                id,
                name: record.name.clone(),
                genres: record.genres_joined(),
                followers: record.followers.unwrap_or(0),
                related: record.related_joined(),
            });

            for related in &record.related_artists {
                let target = ids.get(related.as_str()).copied().ok_or_else(|| {
                    GraphError::UnresolvedReference {
                        artist: record.name.clone(),
                        reference: related.clone(),
                    }
                })?;

                tables.edges.push(match self.endpoints {
                    EdgeEndpoints::Id => EdgeRow {
                        source: id.to_string(),
                        target: target.to_string(),
                    },
                    EdgeEndpoints::Name => EdgeRow {
                        source: record.name.clone(),
                        target: related.clone(),
                    },
                });
            }
        }

        Ok(tables)
    }

    pub fn write_nodes<W: Write>(&self, nodes: &[NodeRow], out: &mut CsvWriter<W>) -> GraphResult<()> {
        out.write_record(self.schema.header())?;
        for node in nodes {
            out.write_record(node.cells(self.schema))?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn write_edges<W: Write>(&self, edges: &[EdgeRow], out: &mut CsvWriter<W>) -> GraphResult<()> {
        out.write_record(EDGE_HEADER)?;
        for edge in edges {
            out.write_record(edge.cells())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Build both tables and write them. Nothing is written if an edge is dangling.
    pub fn write_files(&self, seeds: &SeedSet, nodes_path: &Path, edges_path: &Path) -> GraphResult<GraphTables> {
        let tables = self.build_tables(seeds)?;

        info!(
            "Writing {} nodes to {}",
            tables.nodes.len(),
            nodes_path.display()
        );
        self.write_nodes(&tables.nodes, &mut CsvWriter::create(nodes_path)?)?;

        info!(
            "Writing {} edges to {}",
            tables.edges.len(),
            edges_path.display()
        );
        self.write_edges(&tables.edges, &mut CsvWriter::create(edges_path)?)?;

        Ok(tables)
    }
}
