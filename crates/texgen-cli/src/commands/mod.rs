//! CLI command implementations

pub mod asset;
pub mod generate;
