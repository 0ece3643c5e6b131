//! The generation orchestrator
//!
//! One run walks
//! `Idle -> Submitting -> AwaitingGeneration -> AwaitingDownload -> Decoding -> Materializing -> Idle`
//! on a worker thread. The caller gets a [`RunHandle`] back immediately,
//! receives stage changes and the final [`Notification`] as [`PipelineEvent`]s,
//! and can wait for the typed [`RunOutcome`].
//!
//! Each dispatch holds the busy flag until its worker exits (success, failure
//! or panic), and releases it before the final notification is sent. The flag
//! stays raised while any run is in flight. Callers gate their trigger on
//! [`TextureGenerator::is_busy`]; `submit` itself does not refuse a second
//! dispatch.

use crate::decode::decode_png;
use crate::materialize::{materialize_texture, Provenance};
use crate::request::GenerationRequest;
use crate::transport::Transport;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use texgen_asset::{AssetMeta, AssetPath, ContentLibrary};
use texgen_core::{Result, TexGenError};

pub const NOTIFICATION_TITLE: &str = "Texture Generator";
pub const FAILURE_MESSAGE: &str = "Texture Generation Failed";

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Submitting,
    AwaitingGeneration,
    AwaitingDownload,
    Decoding,
    Materializing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Submitting => "submitting",
            PipelineStage::AwaitingGeneration => "awaiting generation",
            PipelineStage::AwaitingDownload => "awaiting download",
            PipelineStage::Decoding => "decoding",
            PipelineStage::Materializing => "materializing",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// The user-facing result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub outcome: Outcome,
    pub title: &'static str,
    pub message: String,
}

impl Notification {
    fn success(destination: &AssetPath) -> Self {
        Self {
            outcome: Outcome::Success,
            title: NOTIFICATION_TITLE,
            message: format!("Texture Successfully Generated at {}", destination),
        }
    }

    /// Every failure reads the same; detail goes to the log only
    fn failure() -> Self {
        Self {
            outcome: Outcome::Failure,
            title: NOTIFICATION_TITLE,
            message: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Progress reported while a run is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Stage(PipelineStage),
    Finished(Notification),
}

/// The three values the user supplies, plus the prompt
#[derive(Debug, Clone, Default)]
pub struct GenerateInputs {
    pub prompt: String,
    pub size: String,
    /// Folder, e.g. `/Game/Gen`
    pub destination_path: String,
    /// Asset name inside the folder, e.g. `Circle`
    pub texture_name: String,
}

/// What a finished run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub notification: Notification,
    pub result: Result<AssetMeta>,
}

/// Shared "an operation is in flight" flag, cloneable for UI binding.
///
/// Counts runs in flight; busy until the last one finishes.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicUsize>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn raise(&self) -> BusyGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        BusyGuard(Arc::clone(&self.0))
    }
}

/// Releases one run's hold on the busy flag when dropped
struct BusyGuard(Arc<AtomicUsize>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to a dispatched run
pub struct RunHandle {
    events: Receiver<PipelineEvent>,
    worker: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Blocking iterator over events; ends when the run is over
    pub fn events(&self) -> mpsc::Iter<'_, PipelineEvent> {
        self.events.iter()
    }

    /// Events already delivered, without blocking
    pub fn pending_events(&self) -> mpsc::TryIter<'_, PipelineEvent> {
        self.events.try_iter()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Block until the run reaches a terminal state
    pub fn wait(self) -> RunOutcome {
        match self.worker.join() {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!("texture generation worker panicked");
                RunOutcome {
                    notification: Notification::failure(),
                    result: Err(TexGenError::WorkerPanicked),
                }
            }
        }
    }
}

/// Owns the transport, the content library and the busy flag for the
/// lifetime of the feature.
pub struct TextureGenerator {
    transport: Arc<dyn Transport>,
    library: Arc<Mutex<ContentLibrary>>,
    busy: BusyFlag,
}

impl TextureGenerator {
    pub fn new(transport: Box<dyn Transport>, library: ContentLibrary) -> Self {
        Self {
            transport: Arc::from(transport),
            library: Arc::new(Mutex::new(library)),
            busy: BusyFlag::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// A clone of the busy flag for whatever UI binds to this generator
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn library(&self) -> Arc<Mutex<ContentLibrary>> {
        Arc::clone(&self.library)
    }

    /// Raise the busy flag and start a run on a worker thread
    pub fn submit(&self, inputs: GenerateInputs) -> RunHandle {
        let guard = self.busy.raise();
        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);
        let library = Arc::clone(&self.library);

        let worker = std::thread::spawn(move || {
            let result = {
                let _guard = guard;
                run_stages(transport.as_ref(), &library, &inputs, &tx)
            };

            let notification = match &result {
                Ok(meta) => {
                    tracing::info!(path = %meta.path, hash = %meta.hash, "texture generated");
                    Notification::success(&meta.path)
                }
                Err(e) => {
                    tracing::warn!(category = %e.category(), error = %e, "texture generation failed");
                    Notification::failure()
                }
            };

            let _ = tx.send(PipelineEvent::Stage(PipelineStage::Idle));
            let _ = tx.send(PipelineEvent::Finished(notification.clone()));
            RunOutcome {
                notification,
                result,
            }
        });

        RunHandle { events: rx, worker }
    }

    /// Dispatch and wait
    pub fn generate(&self, inputs: GenerateInputs) -> RunOutcome {
        self.submit(inputs).wait()
    }
}

fn run_stages(
    transport: &dyn Transport,
    library: &Mutex<ContentLibrary>,
    inputs: &GenerateInputs,
    events: &Sender<PipelineEvent>,
) -> Result<AssetMeta> {
    let enter = |stage: PipelineStage| {
        tracing::debug!(%stage, "pipeline stage");
        let _ = events.send(PipelineEvent::Stage(stage));
    };

    enter(PipelineStage::Submitting);
    let request = GenerationRequest::new(inputs.prompt.as_str(), inputs.size.as_str());

    enter(PipelineStage::AwaitingGeneration);
    let response = transport.generate(&request)?;
    let url = response.first_url().ok_or_else(|| {
        TexGenError::MalformedResponse("No image URL in response".to_string())
    })?;
    if response.data.len() > 1 {
        tracing::debug!(ignored = response.data.len() - 1, "using the first image URL only");
    }

    enter(PipelineStage::AwaitingDownload);
    let bytes = transport.download(url)?;
    if bytes.is_empty() {
        return Err(TexGenError::EmptyDownload);
    }

    enter(PipelineStage::Decoding);
    let pixels = decode_png(&bytes)?;

    enter(PipelineStage::Materializing);
    let destination = AssetPath::join(&inputs.destination_path, &inputs.texture_name)?;
    // The catalog only changes after a package write succeeds, so a lock
    // poisoned by an earlier panicking run still guards consistent state.
    let mut library = library.lock().unwrap_or_else(PoisonError::into_inner);

    materialize_texture(
        &mut library,
        pixels,
        &destination,
        Provenance {
            prompt: request.prompt,
            size: request.size,
            source_url: url.to_string(),
            transport: transport.name().to_string(),
        },
    )
}
