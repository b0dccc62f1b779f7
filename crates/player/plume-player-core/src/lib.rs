//! Plume Player Core (engine-agnostic)
//!
//! Session, controller and event plumbing for a declarative vector-animation
//! view. This crate defines the immutable data model (source descriptors and
//! playback configuration), the shared animation session with its broadcast
//! event channels, the engine controller that owns exactly one live engine
//! instance, and the scheduler/engine capability seams the host provides.
//! Parsing and rendering the animation format belong to the engine
//! collaborator, never to this crate.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod event;
pub mod layout;
pub mod scheduler;
pub mod session;
pub mod source;

// Re-exports for consumers (adapters)
pub use config::{LoopMode, PlaybackConfig, ProgressRange};
pub use controller::EngineController;
pub use engine::{AnimationEngine, EngineHost, PlayCompletion, RemoteLoadCallback};
pub use error::PlayerError;
pub use event::{EventChannel, Subscription};
pub use layout::{FitMode, Rect, Size};
pub use scheduler::{InlineScheduler, Scheduler, Task};
pub use session::AnimationSession;
pub use source::{AnimationSource, BundleRef};
pub use url;

/// Player core result type
pub type Result<T> = core::result::Result<T, PlayerError>;
