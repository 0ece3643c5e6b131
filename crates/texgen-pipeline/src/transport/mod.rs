//! Transport for the two outbound calls of a run
//!
//! `generate` posts the prompt and returns the parsed response; `download`
//! fetches the raw bytes behind one of the returned URLs. Both block the
//! calling thread; the orchestrator runs them off the caller's thread.

pub mod mock;
pub mod openai;

use crate::config::TexGenConfig;
use crate::request::GenerationRequest;
use crate::response::GenerationResponse;
use texgen_core::{Result, TexGenError};

/// The generation service as seen by the orchestrator
pub trait Transport: Send + Sync {
    /// Transport name (e.g. "openai", "mock")
    fn name(&self) -> &str;

    /// Issue the generation call and parse its body
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    /// Fetch the bytes at `url`. An empty body is returned as-is.
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Create a transport by name with configuration
pub fn create_transport(name: &str, config: &TexGenConfig) -> Result<Box<dyn Transport>> {
    match name {
        "openai" => Ok(Box::new(openai::OpenAiTransport::from_config(config))),
        "mock" => Ok(Box::new(mock::MockTransport::new())),
        _ => Err(TexGenError::ConfigError(format!(
            "Unknown transport '{}'. Available: {}",
            name,
            available_transports().join(", ")
        ))),
    }
}

/// List all available transport names
pub fn available_transports() -> Vec<&'static str> {
    vec!["openai", "mock"]
}
