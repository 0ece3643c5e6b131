//! Error types for texgen

use std::fmt;
use thiserror::Error;

/// The main error type for texgen operations
#[derive(Debug, Error)]
pub enum TexGenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("{call} call returned HTTP {code}")]
    HttpStatus { call: &'static str, code: u16 },

    #[error("Not enough image generation credits for request")]
    InsufficientCredits,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Downloaded image body is empty")]
    EmptyDownload,

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Destination error: {0}")]
    DestinationError(String),

    #[error("Texture creation error: {0}")]
    TextureCreationError(String),

    #[error("Asset error: {0}")]
    AssetError(String),

    #[error("Pipeline worker panicked")]
    WorkerPanicked,
}

/// Result type alias for texgen operations
pub type Result<T> = std::result::Result<T, TexGenError>;

/// Which step of a generation run an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Connection-level failure or non-2xx status
    Transport,
    /// Body that did not parse, carried no images, or was empty
    Response,
    /// Downloaded bytes were not a decodable PNG
    Decode,
    /// The destination package could not be created
    Destination,
    /// The texture object could not be built from the pixels
    TextureCreation,
    /// Configuration, IO, or store errors outside the run stages
    Environment,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Transport => write!(f, "transport"),
            FailureCategory::Response => write!(f, "response"),
            FailureCategory::Decode => write!(f, "decode"),
            FailureCategory::Destination => write!(f, "destination"),
            FailureCategory::TextureCreation => write!(f, "texture creation"),
            FailureCategory::Environment => write!(f, "environment"),
        }
    }
}

impl TexGenError {
    /// Classify this error into the run-failure taxonomy
    pub fn category(&self) -> FailureCategory {
        match self {
            TexGenError::TransportError(_)
            | TexGenError::HttpStatus { .. }
            | TexGenError::InsufficientCredits => FailureCategory::Transport,
            TexGenError::MalformedResponse(_) | TexGenError::EmptyDownload => {
                FailureCategory::Response
            }
            TexGenError::DecodeError(_) => FailureCategory::Decode,
            TexGenError::DestinationError(_) => FailureCategory::Destination,
            TexGenError::TextureCreationError(_) => FailureCategory::TextureCreation,
            TexGenError::IoError(_)
            | TexGenError::TomlParseError(_)
            | TexGenError::TomlSerError(_)
            | TexGenError::ConfigError(_)
            | TexGenError::AssetError(_)
            | TexGenError::WorkerPanicked => FailureCategory::Environment,
        }
    }
}

impl From<toml::de::Error> for TexGenError {
    fn from(err: toml::de::Error) -> Self {
        TexGenError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TexGenError {
    fn from(err: toml::ser::Error) -> Self {
        TexGenError::TomlSerError(err.to_string())
    }
}
