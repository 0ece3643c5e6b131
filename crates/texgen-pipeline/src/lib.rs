//! TexGen Pipeline - prompt-to-texture generation
//!
//! Sends a text prompt to an image generation service, downloads the first
//! returned image, decodes it and saves it as a texture asset in a
//! [`texgen_asset::ContentLibrary`]. Runs off the caller's thread with a busy
//! flag and a single success/failure notification per run.

pub mod config;
pub mod decode;
pub mod materialize;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod transport;

pub use config::TexGenConfig;
pub use decode::{decode_png, ImagePixels};
pub use materialize::{materialize_texture, Provenance};
pub use orchestrator::{
    BusyFlag, GenerateInputs, Notification, Outcome, PipelineEvent, PipelineStage, RunHandle,
    RunOutcome, TextureGenerator, FAILURE_MESSAGE, NOTIFICATION_TITLE,
};
pub use request::{GenerationRequest, DEFAULT_SIZE};
pub use response::{GenerationResponse, ImageUrl};
pub use transport::{available_transports, create_transport, Transport};
