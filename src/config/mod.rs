//! Configuration module for artistgraph
//!
//! This module contains the pipeline settings and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;

/// Environment variable holding the catalog client id
pub const CLIENT_ID_VAR: &str = "SPOTIPY_CLIENT_ID";

/// Environment variable holding the catalog client secret
pub const CLIENT_SECRET_VAR: &str = "SPOTIPY_CLIENT_SECRET";
