//! Utility modules

pub mod csv;
pub mod parsers;
pub mod progress;
