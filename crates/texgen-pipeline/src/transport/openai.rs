//! OpenAI images transport
//!
//! POSTs the request to the images endpoint with a bearer token, then GETs
//! the returned URL. No retries: every failure ends the run.

use crate::config::TexGenConfig;
use crate::request::GenerationRequest;
use crate::response::GenerationResponse;
use crate::transport::Transport;
use std::io::Read;
use std::time::Duration;
use texgen_core::{Result, TexGenError};

const GENERATION_CALL: &str = "generation";
const DOWNLOAD_CALL: &str = "download";

/// Transport for the hosted image generation API
pub struct OpenAiTransport {
    api_key: String,
    api_url: String,
    agent: ureq::Agent,
}

impl OpenAiTransport {
    /// Create a transport from config.
    ///
    /// A missing key is not an error here; the service answers with an
    /// authorization failure and the run fails like any other transport error.
    pub fn from_config(config: &TexGenConfig) -> Self {
        if config.api_key().is_none() {
            tracing::warn!(
                "no API key configured; set TEXGEN_OPENAI_API_KEY or add [openai] api_key to .texgen/config.toml"
            );
        }
        Self::new(
            config.api_key().unwrap_or_default(),
            config.api_url(),
            config.request_timeout(),
        )
    }

    pub fn new(api_key: &str, api_url: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_url: api_url.to_string(),
            agent: build_agent(timeout),
        }
    }
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}

/// Map a ureq failure onto the run taxonomy.
///
/// HTTP 400 on the generation call is how the service reports an exhausted
/// balance, so it gets its own variant for the developer log.
fn classify_error(call: &'static str, e: ureq::Error) -> TexGenError {
    match e {
        ureq::Error::StatusCode(400) if call == GENERATION_CALL => {
            tracing::warn!("not enough image generation credits for request");
            TexGenError::InsufficientCredits
        }
        ureq::Error::StatusCode(code) => TexGenError::HttpStatus { call, code },
        other => TexGenError::TransportError(format!("{} call failed: {}", call, other)),
    }
}

impl Transport for OpenAiTransport {
    fn name(&self) -> &str {
        "openai"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let mut response = self
            .agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(request)
            .map_err(|e| classify_error(GENERATION_CALL, e))?;

        let body = response.body_mut().read_to_string().map_err(|e| {
            TexGenError::TransportError(format!("Failed to read generation response: {}", e))
        })?;

        GenerationResponse::parse(&body)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| classify_error(DOWNLOAD_CALL, e))?;

        let mut reader = response.into_body().into_reader();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| {
            TexGenError::TransportError(format!("Failed to read image data: {}", e))
        })?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_on_generation_means_credits() {
        let err = classify_error(GENERATION_CALL, ureq::Error::StatusCode(400));
        assert!(matches!(err, TexGenError::InsufficientCredits));
    }

    #[test]
    fn test_bad_request_on_download_is_plain_status() {
        let err = classify_error(DOWNLOAD_CALL, ureq::Error::StatusCode(400));
        assert!(matches!(
            err,
            TexGenError::HttpStatus {
                call: "download",
                code: 400
            }
        ));
    }

    #[test]
    fn test_connection_failure() {
        let err = classify_error(GENERATION_CALL, ureq::Error::ConnectionFailed);
        assert!(matches!(err, TexGenError::TransportError(_)));
    }

    #[test]
    fn test_from_config_without_key() {
        let transport = OpenAiTransport::from_config(&TexGenConfig::default());
        assert_eq!(transport.name(), "openai");
        assert_eq!(transport.api_url, crate::config::DEFAULT_API_URL);
        assert!(transport.api_key.is_empty());
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to be serving HTTP
        let transport = OpenAiTransport::new(
            "sk-test",
            "http://127.0.0.1:9/v1/images/generations",
            Duration::from_secs(2),
        );
        let err = transport
            .generate(&GenerationRequest::new("grass", "256x256"))
            .unwrap_err();
        assert_eq!(err.category(), texgen_core::FailureCategory::Transport);
    }
}
