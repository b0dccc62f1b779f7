//! Consumed capabilities: the opaque animation engine and its host.
//!
//! The core never parses or renders animation data. It drives an engine
//! instance through this seam, and asks the host to construct instances and
//! to splice them in and out of the visual hierarchy.

use url::Url;

use crate::config::LoopMode;
use crate::layout::{FitMode, Rect};
use crate::source::BundleRef;

/// Invoked once when an autoplay cycle ends, with whether playback finished
/// naturally (true) or was interrupted by a stop (false).
pub type PlayCompletion = Box<dyn FnOnce(bool) + Send>;

/// Invoked once when a remote fetch settles, with the fetch outcome. The
/// host may call it from any thread; the controller marshals the
/// continuation back onto the UI scheduler.
pub type RemoteLoadCallback = Box<dyn FnOnce(bool) + Send>;

/// One live animation-engine instance. Exclusively owned by its engine
/// controller; no other component mutates it.
pub trait AnimationEngine: Send {
    /// Play from one fractional progress to another under a loop mode,
    /// reporting the outcome through `completion`
    fn play(&mut self, from: f32, to: f32, loop_mode: LoopMode, completion: PlayCompletion);

    /// Stop playback and reset to the start frame. Interrupts any pending
    /// play completion with `false`.
    fn stop(&mut self);

    /// Current clock position as fractional progress
    fn progress(&self) -> f32;

    /// Set the clock position directly. Stops any running playback, per the
    /// external-scrub contract.
    fn set_progress(&mut self, progress: f32);

    /// Update the engine's frame bounds
    fn set_frame(&mut self, frame: Rect);

    /// Set the content layout mode
    fn set_fit_mode(&mut self, mode: FitMode);

    /// Set the loop behavior used by subsequent plays
    fn set_loop_mode(&mut self, mode: LoopMode);

    /// Set the clock speed multiplier
    fn set_speed(&mut self, speed: f32);
}

/// Constructs engine instances per source kind and owns the visual-hierarchy
/// seams around them.
pub trait EngineHost: Send {
    type Engine: AnimationEngine + 'static;

    /// Construct an engine from a bundled asset. `None` means the asset is
    /// missing or unparseable; by the local-load success policy the caller
    /// still reports the load as downloaded.
    fn construct_bundled(&mut self, name: &str, bundle: &BundleRef) -> Option<Self::Engine>;

    /// Construct an engine that fetches its animation from a URL. The engine
    /// shell is returned immediately; `on_loaded` fires later with the fetch
    /// outcome, possibly from another thread, but never synchronously from
    /// inside this call. Fetch failure and timeout policy belong to the
    /// host.
    fn construct_remote(&mut self, url: &Url, on_loaded: RemoteLoadCallback) -> Self::Engine;

    /// Construct an engine from a local file path. `None` means the file is
    /// missing or unparseable, reported like the bundled case.
    fn construct_file(&mut self, path: &str) -> Option<Self::Engine>;

    /// Add an engine to the visual hierarchy
    fn attach(&mut self, engine: &mut Self::Engine);

    /// Remove an engine from the visual hierarchy
    fn detach(&mut self, engine: &mut Self::Engine);
}
