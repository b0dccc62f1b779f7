//! Deterministic test doubles shared by the workspace test suites:
//! a scripted engine/host pair that records every capability call, a manual
//! scheduler that drains on demand, and a recorder for session events.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{bail, Result};
use plume_player_core::url::Url;
use plume_player_core::{
    AnimationEngine, BundleRef, EngineHost, FitMode, LoopMode, PlayCompletion, Rect,
    RemoteLoadCallback, Scheduler, Task,
};

/// One recorded engine capability call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Play {
        from: f32,
        to: f32,
        loop_mode: LoopMode,
    },
    Stop,
    SetProgress(f32),
    SetFrame(Rect),
    SetFitMode(FitMode),
    SetLoopMode(LoopMode),
    SetSpeed(f32),
    Attached,
    Detached,
}

struct ProbeState {
    calls: Vec<EngineCall>,
    progress: f32,
    pending_completion: Option<PlayCompletion>,
    attached: bool,
}

/// Shared handle onto one scripted engine's recorded state. Clones observe
/// the same engine, so tests keep a probe while the engine itself moves into
/// the controller.
#[derive(Clone)]
pub struct EngineProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl EngineProbe {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ProbeState {
                calls: Vec::new(),
                progress: 0.0,
                pending_completion: None,
                attached: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    /// Number of `Play` calls recorded
    pub fn play_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Play { .. }))
            .count()
    }

    /// Current scripted clock position
    pub fn progress(&self) -> f32 {
        self.lock().progress
    }

    /// Whether the engine currently sits in the visual hierarchy
    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// Whether a play is running (its completion has not fired)
    pub fn has_pending_playback(&self) -> bool {
        self.lock().pending_completion.is_some()
    }

    /// Drive the running play to its natural end (or interruption),
    /// invoking the stored completion with `did_finish`
    pub fn finish_playback(&self, did_finish: bool) -> Result<()> {
        let completion = self.lock().pending_completion.take();
        match completion {
            Some(completion) => {
                completion(did_finish);
                Ok(())
            }
            None => bail!("no playback in flight on this engine"),
        }
    }
}

/// Engine double that records every call and lets the test script playback
/// completion. Stopping or scrubbing interrupts a running play with
/// `did_finish = false`, the way the real engine's clock reports it.
pub struct ScriptedEngine {
    probe: EngineProbe,
    index: usize,
}

impl AnimationEngine for ScriptedEngine {
    fn play(&mut self, from: f32, to: f32, loop_mode: LoopMode, completion: PlayCompletion) {
        let interrupted = {
            let mut state = self.probe.lock();
            state.calls.push(EngineCall::Play {
                from,
                to,
                loop_mode,
            });
            state.pending_completion.replace(completion)
        };
        if let Some(previous) = interrupted {
            previous(false);
        }
    }

    fn stop(&mut self) {
        let interrupted = {
            let mut state = self.probe.lock();
            state.calls.push(EngineCall::Stop);
            state.progress = 0.0;
            state.pending_completion.take()
        };
        if let Some(completion) = interrupted {
            completion(false);
        }
    }

    fn progress(&self) -> f32 {
        self.probe.lock().progress
    }

    fn set_progress(&mut self, progress: f32) {
        let interrupted = {
            let mut state = self.probe.lock();
            state.calls.push(EngineCall::SetProgress(progress));
            state.progress = progress;
            state.pending_completion.take()
        };
        if let Some(completion) = interrupted {
            completion(false);
        }
    }

    fn set_frame(&mut self, frame: Rect) {
        self.probe.lock().calls.push(EngineCall::SetFrame(frame));
    }

    fn set_fit_mode(&mut self, mode: FitMode) {
        self.probe.lock().calls.push(EngineCall::SetFitMode(mode));
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.probe.lock().calls.push(EngineCall::SetLoopMode(mode));
    }

    fn set_speed(&mut self, speed: f32) {
        self.probe.lock().calls.push(EngineCall::SetSpeed(speed));
    }
}

/// One entry in the host's construction/attachment log, indexed by the order
/// engines were constructed in.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Constructed { kind: &'static str, index: usize },
    Attached(usize),
    Detached(usize),
}

struct HostState {
    assets: HashSet<String>,
    probes: Vec<EngineProbe>,
    pending_remote: VecDeque<RemoteLoadCallback>,
    log: Vec<HostEvent>,
}

/// Host double. Cloning yields another handle onto the same state, so the
/// test keeps one while the controller owns the other. Bundled and file
/// constructions succeed when the name/path was registered with
/// [`ScriptedHost::with_asset`]; remote constructions always return a shell
/// whose load callback waits for [`ScriptedHost::complete_remote`].
#[derive(Clone)]
pub struct ScriptedHost {
    state: Arc<Mutex<HostState>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState {
                assets: HashSet::new(),
                probes: Vec::new(),
                pending_remote: VecDeque::new(),
                log: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a bundled name or file path that decodes successfully
    pub fn with_asset(self, name: impl Into<String>) -> Self {
        self.lock().assets.insert(name.into());
        self
    }

    fn construct_engine(&self, kind: &'static str) -> ScriptedEngine {
        let mut state = self.lock();
        let index = state.probes.len();
        let probe = EngineProbe::new();
        state.probes.push(probe.clone());
        state.log.push(HostEvent::Constructed { kind, index });
        ScriptedEngine { probe, index }
    }

    /// Probe for the `index`-th constructed engine
    pub fn probe(&self, index: usize) -> Option<EngineProbe> {
        self.lock().probes.get(index).cloned()
    }

    /// Probe for the most recently constructed engine
    pub fn last_probe(&self) -> Option<EngineProbe> {
        self.lock().probes.last().cloned()
    }

    /// Number of engines constructed so far
    pub fn engine_count(&self) -> usize {
        self.lock().probes.len()
    }

    /// Construction/attachment log, in order
    pub fn log(&self) -> Vec<HostEvent> {
        self.lock().log.clone()
    }

    /// Number of remote loads whose callbacks have not been completed
    pub fn pending_remote_count(&self) -> usize {
        self.lock().pending_remote.len()
    }

    /// Settle the oldest in-flight remote load with the given outcome
    pub fn complete_remote(&self, success: bool) -> Result<()> {
        let callback = self.lock().pending_remote.pop_front();
        match callback {
            Some(callback) => {
                callback(success);
                Ok(())
            }
            None => bail!("no remote load in flight"),
        }
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineHost for ScriptedHost {
    type Engine = ScriptedEngine;

    fn construct_bundled(&mut self, name: &str, _bundle: &BundleRef) -> Option<ScriptedEngine> {
        if !self.lock().assets.contains(name) {
            return None;
        }
        Some(self.construct_engine("bundled"))
    }

    fn construct_remote(&mut self, _url: &Url, on_loaded: RemoteLoadCallback) -> ScriptedEngine {
        let engine = self.construct_engine("remote");
        self.lock().pending_remote.push_back(on_loaded);
        engine
    }

    fn construct_file(&mut self, path: &str) -> Option<ScriptedEngine> {
        if !self.lock().assets.contains(path) {
            return None;
        }
        Some(self.construct_engine("file_path"))
    }

    fn attach(&mut self, engine: &mut ScriptedEngine) {
        {
            let mut state = engine.probe.lock();
            state.attached = true;
            state.calls.push(EngineCall::Attached);
        }
        self.lock().log.push(HostEvent::Attached(engine.index));
    }

    fn detach(&mut self, engine: &mut ScriptedEngine) {
        {
            let mut state = engine.probe.lock();
            state.attached = false;
            state.calls.push(EngineCall::Detached);
        }
        self.lock().log.push(HostEvent::Detached(engine.index));
    }
}

/// Scheduler double: queues tasks until the test drains them, making
/// scheduling order observable and deterministic.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Run the oldest queued task. Returns false if the queue was empty.
    pub fn run_one(&self) -> bool {
        let task = self.lock().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run queued tasks until none remain, including tasks enqueued while
    /// draining. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_one() {
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn submit(&self, task: Task) {
        self.lock().push_back(task);
    }
}

/// Collects values emitted on a session event channel, for assertions.
#[derive(Clone, Default)]
pub struct EventRecorder {
    values: Arc<Mutex<Vec<bool>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to subscribe onto a channel or pass as a view prop
    pub fn callback(&self) -> impl Fn(bool) + Send + Sync + 'static {
        let values = Arc::clone(&self.values);
        move |value| {
            values
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(value);
        }
    }

    /// Values recorded so far, in emission order
    pub fn values(&self) -> Vec<bool> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of recorded emissions
    pub fn count(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
