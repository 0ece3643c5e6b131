//! texgen Core - Foundational types shared by the texgen crates
//!
//! This crate provides:
//! - `TexGenError` - The error taxonomy for a generation run
//! - `FailureCategory` - Coarse classification of run failures
//! - `ContentHash` - SHA-256 based content hashing
//! - `Result` alias

mod error;
mod hash;

pub use error::{FailureCategory, Result, TexGenError};
pub use hash::ContentHash;
