//! The engine controller: owns at most one live engine instance and drives
//! it through load, autoplay, scrub, resize and teardown transitions.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

use crate::engine::{AnimationEngine, EngineHost, PlayCompletion, RemoteLoadCallback};
use crate::layout::{Rect, Size};
use crate::scheduler::Scheduler;
use crate::session::AnimationSession;
use crate::AnimationSource;
use crate::PlaybackConfig;

/// Control mode of a controller. `Autoplay` is the initial state;
/// `Scrubbed` is terminal for the life of the controller — the first
/// positive external progress value latches it and nothing unlatches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlMode {
    Autoplay,
    Scrubbed,
}

struct ControllerInner<H: EngineHost> {
    host: H,
    engine: Option<H::Engine>,
    mode: ControlMode,
    /// Bumped on every install and teardown. Scheduled work carries the
    /// generation it was born under and becomes a no-op once superseded.
    generation: u64,
    /// True while a remote fetch for the current install is in flight.
    /// Autoplay holds off until the fetch settles; only a successful fetch
    /// starts playback.
    awaiting_remote: bool,
}

impl<H: EngineHost> ControllerInner<H> {
    /// Stop, detach and release the current engine, if any. Always runs to
    /// completion before a replacement is constructed, so the hierarchy
    /// never holds two live engines for one controller.
    fn teardown_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
            self.host.detach(&mut engine);
            debug!("released previous engine instance");
        }
    }

    /// Configure a freshly constructed engine from the session config, then
    /// attach it. Configuration precedes attachment so the engine never
    /// renders with stale parameters.
    fn install_engine(&mut self, mut engine: H::Engine, config: &PlaybackConfig) {
        engine.set_fit_mode(config.fit_mode);
        engine.set_loop_mode(config.loop_mode);
        engine.set_speed(config.speed);
        self.host.attach(&mut engine);
        self.engine = Some(engine);
    }
}

impl<H: EngineHost> Drop for ControllerInner<H> {
    fn drop(&mut self) {
        self.teardown_engine();
    }
}

fn lock_inner<H: EngineHost>(
    inner: &Arc<Mutex<ControllerInner<H>>>,
) -> MutexGuard<'_, ControllerInner<H>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Translates an animation session plus explicit scrub values and viewport
/// sizes into engine-instance lifecycle operations.
///
/// At most one live engine exists per controller at any time. Installing a
/// replacement always tears the previous instance down first. In-flight
/// remote loads that have been superseded are detected by generation and
/// dropped without side effects.
pub struct EngineController<H: EngineHost> {
    inner: Arc<Mutex<ControllerInner<H>>>,
    scheduler: Arc<dyn Scheduler>,
}

impl<H: EngineHost + 'static> EngineController<H> {
    /// Create an empty controller driving engines built by `host`
    pub fn new(host: H, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                host,
                engine: None,
                mode: ControlMode::Autoplay,
                generation: 0,
                awaiting_remote: false,
            })),
            scheduler,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner<H>> {
        lock_inner(&self.inner)
    }

    /// Load the session's source, replacing any previously installed engine.
    ///
    /// Returns immediately for every source kind; the load outcome arrives
    /// on the session's `on_downloaded` channel. Local kinds (bundled, file
    /// path) construct synchronously and always report success, even when
    /// the asset fails to decode — only remote fetches report failure.
    pub fn install(&mut self, session: &Arc<AnimationSession>) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        let generation = inner.generation;
        inner.mode = if session.external_control {
            ControlMode::Scrubbed
        } else {
            ControlMode::Autoplay
        };
        inner.awaiting_remote = session.source.is_remote();
        inner.teardown_engine();
        debug!(
            "installing {} source (generation {})",
            session.source.kind(),
            generation
        );

        match &session.source {
            AnimationSource::Bundled { name, bundle } => {
                match inner.host.construct_bundled(name, bundle) {
                    Some(engine) => inner.install_engine(engine, &session.config),
                    None => warn!(
                        "bundled animation '{}' missing or undecodable; engine left empty",
                        name
                    ),
                }
                drop(inner);
                self.schedule_downloaded(session, true);
            }
            AnimationSource::Remote { url } => {
                let on_loaded = self.remote_callback(session, generation);
                let engine = inner.host.construct_remote(url, on_loaded);
                inner.install_engine(engine, &session.config);
            }
            AnimationSource::FilePath { path } => {
                match inner.host.construct_file(path) {
                    Some(engine) => inner.install_engine(engine, &session.config),
                    None => warn!(
                        "animation file '{}' missing or undecodable; engine left empty",
                        path
                    ),
                }
                drop(inner);
                self.schedule_downloaded(session, true);
            }
        }
    }

    /// Schedule autoplay over the configured range unless this controller is
    /// under external scrub control. The play call itself runs as a
    /// scheduler task, after any pending `on_downloaded` emission from the
    /// same install.
    pub fn begin_autoplay(&mut self, session: &Arc<AnimationSession>) {
        let generation = {
            let inner = self.lock();
            if inner.mode == ControlMode::Scrubbed {
                return;
            }
            inner.generation
        };
        let inner = Arc::clone(&self.inner);
        let scheduler = Arc::clone(&self.scheduler);
        let session = Arc::clone(session);
        self.scheduler.submit(Box::new(move || {
            Self::autoplay_now(&inner, &scheduler, &session, generation);
        }));
    }

    /// Apply an externally driven progress value.
    ///
    /// The first positive value permanently latches this controller into
    /// external control; autoplay never resumes afterwards, even if the
    /// value returns to zero. While latched, the engine clock is set
    /// directly to the clamped value and no play/loop logic runs.
    pub fn apply_external_progress(&mut self, value: f32) {
        let mut inner = self.lock();
        if value > 0.0 && inner.mode == ControlMode::Autoplay {
            inner.mode = ControlMode::Scrubbed;
            debug!("external control engaged; autoplay disabled for this controller");
        }
        if inner.mode == ControlMode::Scrubbed {
            if let Some(engine) = inner.engine.as_mut() {
                engine.set_progress(value.clamp(0.0, 1.0));
            }
        }
    }

    /// Update the engine frame to fill `size`. Idempotent; no-op while no
    /// engine is installed.
    pub fn resize(&mut self, size: Size) {
        if let Some(engine) = self.lock().engine.as_mut() {
            engine.set_frame(Rect::at_origin(size));
        }
    }

    /// Stop playback on the live engine without releasing it
    pub fn stop(&mut self) {
        if let Some(engine) = self.lock().engine.as_mut() {
            engine.stop();
        }
    }

    /// Stop, detach and release the live engine and invalidate all
    /// outstanding scheduled work for it
    pub fn teardown(&mut self) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.awaiting_remote = false;
        inner.teardown_engine();
    }

    /// Current engine clock position; 0.0 while no engine is installed
    pub fn progress(&self) -> f32 {
        self.lock().engine.as_ref().map_or(0.0, |e| e.progress())
    }

    /// Whether a live engine is currently installed
    pub fn has_engine(&self) -> bool {
        self.lock().engine.is_some()
    }

    /// Whether the external-control latch has engaged
    pub fn is_externally_controlled(&self) -> bool {
        self.lock().mode == ControlMode::Scrubbed
    }

    fn schedule_downloaded(&self, session: &Arc<AnimationSession>, success: bool) {
        let session = Arc::clone(session);
        self.scheduler.submit(Box::new(move || {
            session.on_downloaded.emit(success);
        }));
    }

    /// Completion for an in-flight remote fetch. Marshals onto the UI
    /// scheduler, then drops silently if the install that started the fetch
    /// has been superseded.
    fn remote_callback(
        &self,
        session: &Arc<AnimationSession>,
        generation: u64,
    ) -> RemoteLoadCallback {
        let inner = Arc::clone(&self.inner);
        let scheduler = Arc::clone(&self.scheduler);
        let session = Arc::clone(session);
        Box::new(move |success| {
            let task_scheduler = Arc::clone(&scheduler);
            scheduler.submit(Box::new(move || {
                {
                    let mut guard = lock_inner(&inner);
                    if guard.generation != generation {
                        warn!(
                            "remote load completion for superseded install (generation {}); discarding",
                            generation
                        );
                        return;
                    }
                    guard.awaiting_remote = false;
                }
                session.on_downloaded.emit(success);
                if success {
                    Self::autoplay_now(&inner, &task_scheduler, &session, generation);
                }
            }));
        })
    }

    /// Start the engine playing the configured range now, unless the
    /// controller moved on (new generation), latched into scrub mode, or
    /// holds no engine. Runs on the UI scheduling context.
    fn autoplay_now(
        inner: &Arc<Mutex<ControllerInner<H>>>,
        scheduler: &Arc<dyn Scheduler>,
        session: &Arc<AnimationSession>,
        generation: u64,
    ) {
        let mut guard = lock_inner(inner);
        if guard.generation != generation
            || guard.mode == ControlMode::Scrubbed
            || guard.awaiting_remote
        {
            return;
        }
        let Some(engine) = guard.engine.as_mut() else {
            return;
        };
        let config = &session.config;
        let completion: PlayCompletion = {
            let scheduler = Arc::clone(scheduler);
            let session = Arc::clone(session);
            Box::new(move |did_finish| {
                scheduler.submit(Box::new(move || {
                    session.on_completed.emit(did_finish);
                }));
            })
        };
        debug!(
            "autoplay: range [{}, {}], {} mode",
            config.range.from(),
            config.range.to(),
            config.loop_mode.name()
        );
        engine.play(
            config.range.from(),
            config.range.to(),
            config.loop_mode,
            completion,
        );
    }
}
