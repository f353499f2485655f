//! Node and edge table rows

use serde::{Deserialize, Serialize};

/// Edge type written to every edge row
pub const EDGE_TYPE: &str = "Undirected";

/// Edge weight written to every edge row
pub const EDGE_WEIGHT: u32 = 1;

/// Which columns the node table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSchema {
    /// `Id, Artist`
    Minimal,
    /// `Id, Artist, Genres, Followers`
    Attributes,
    /// `Id, Artist, Genres, Followers, Related Artist`
    AttributesWithRelated,
}

impl NodeSchema {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            NodeSchema::Minimal => &["Id", "Artist"],
            NodeSchema::Attributes => &["Id", "Artist", "Genres", "Followers"],
            NodeSchema::AttributesWithRelated => {
                &["Id", "Artist", "Genres", "Followers", "Related Artist"]
            }
        }
    }
}

/// How edge rows refer to their endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeEndpoints {
    /// Node `Id` values
    #[default]
    Id,
    /// Raw artist names
    Name,
}

pub const EDGE_HEADER: [&str; 4] = ["Source", "Target", "Type", "Weight"];

/// One row of the node table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: usize,
    pub name: String,
    pub genres: String,
    pub followers: u64,
    pub related: String,
}

impl NodeRow {
    /// Cells for the given schema, in header order
    pub fn cells(&self, schema: NodeSchema) -> Vec<String> {
        let mut cells = vec![self.id.to_string(), self.name.clone()];
        if schema != NodeSchema::Minimal {
            cells.push(self.genres.clone());
            cells.push(self.followers.to_string());
        }
        if schema == NodeSchema::AttributesWithRelated {
            cells.push(self.related.clone());
        }
        cells
    }
}

/// One row of the edge table. Endpoints are already rendered as ids or names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
}

impl EdgeRow {
    pub fn cells(&self) -> [String; 4] {
        [
            self.source.clone(),
            self.target.clone(),
            EDGE_TYPE.to_string(),
            EDGE_WEIGHT.to_string(),
        ]
    }
}
