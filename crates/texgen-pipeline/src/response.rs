//! Generation response parsing

use serde::{Deserialize, Serialize};
use texgen_core::{Result, TexGenError};

/// One generated image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Body of a successful generation call:
/// `{"created": 1690130733, "data": [{"url": "..."}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub created: Option<u64>,
    pub data: Vec<ImageUrl>,
}

impl GenerationResponse {
    /// Parse a response body. A body without `data`, or with an empty
    /// `data` list, is rejected.
    pub fn parse(body: &str) -> Result<Self> {
        let response: GenerationResponse = serde_json::from_str(body)
            .map_err(|e| TexGenError::MalformedResponse(format!("Invalid JSON: {}", e)))?;

        if response.data.is_empty() {
            return Err(TexGenError::MalformedResponse(
                "No image URL in response".to_string(),
            ));
        }
        Ok(response)
    }

    /// The URL that gets downloaded; later entries are not used
    pub fn first_url(&self) -> Option<&str> {
        self.data.first().map(|d| d.url.as_str())
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|d| d.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_url() {
        let response = GenerationResponse::parse(r#"{"data":[{"url":"X"}]}"#).unwrap();
        assert_eq!(response.urls().collect::<Vec<_>>(), vec!["X"]);
        assert_eq!(response.first_url(), Some("X"));
        assert_eq!(response.created, None);
    }

    #[test]
    fn test_parse_full_body() {
        let json = r#"{
            "created": 1690130733,
            "data": [
                {"url": "https://example.com/one.png"},
                {"url": "https://example.com/two.png", "revised_prompt": "ignored"}
            ]
        }"#;
        let response = GenerationResponse::parse(json).unwrap();
        assert_eq!(response.created, Some(1690130733));
        assert_eq!(response.first_url(), Some("https://example.com/one.png"));
        assert_eq!(response.urls().count(), 2);
    }

    #[test]
    fn test_empty_data_is_invalid() {
        let err = GenerationResponse::parse(r#"{"data":[]}"#).unwrap_err();
        assert!(matches!(err, TexGenError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_data_is_invalid() {
        assert!(GenerationResponse::parse(r#"{"created": 1}"#).is_err());
        assert!(GenerationResponse::parse(r#"{"error": {"message": "billing"}}"#).is_err());
        assert!(GenerationResponse::parse("<html>").is_err());
        assert!(GenerationResponse::parse(r#"{"data":[{"b64_json":"..."}]}"#).is_err());
    }
}
