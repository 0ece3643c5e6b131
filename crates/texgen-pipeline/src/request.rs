//! Generation request payload

use serde::{Deserialize, Serialize};

/// Size requested when the caller does not pick one
pub const DEFAULT_SIZE: &str = "1024x1024";

/// Body of the generation call: `{"prompt": .., "n": .., "size": ..}`.
///
/// Neither the prompt nor the size is validated here; the remote service is
/// the one that rejects bad values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(rename = "n")]
    pub count: u32,
    pub size: String,
}

impl GenerationRequest {
    /// One image of `size` for `prompt`
    pub fn new(prompt: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            size: size.into(),
        }
    }

    /// Override the number of images requested
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_SIZE)
    }
}
