//! Declarative-component adapter over the player core.
//!
//! The host UI framework drives an [`AnimationView`] through the
//! mount/render/unmount contract: construct it once with the initial props,
//! hand it every subsequent `(session, scrub value, size)` tuple, and drop
//! it through [`AnimationView::unmount`]. The view decides whether the
//! existing engine can be reused or the source must be reloaded; an
//! unchanged session never reconstructs the engine, so re-renders stay
//! flicker-free.

use std::sync::Arc;

use log::debug;
use plume_player_core::{
    AnimationSession, EngineController, EngineHost, Scheduler, Size, Subscription,
};

/// Caller-facing callback receiving a session event's boolean payload.
pub type EventCallback = Arc<dyn Fn(bool) + Send + Sync>;

fn noop_callback() -> EventCallback {
    Arc::new(|_| {})
}

/// Input props for one render pass.
///
/// `on_downloaded`/`on_completed` are forwarded once per underlying
/// event-channel emission for the lifetime of the mounted view. They are
/// wired to the session's channels at mount and rewired whenever the session
/// changes; renders that only swap callback instances leave the original
/// subscriptions in place.
pub struct ViewProps {
    /// The session describing what to play and how
    pub session: Arc<AnimationSession>,
    /// Externally driven progress. Any positive value engages external
    /// control for the rest of the view's life.
    pub value: f32,
    /// Current container size
    pub size: Size,
    /// Called when a load attempt settles, with its outcome
    pub on_downloaded: EventCallback,
    /// Called when an autoplay cycle completes, with whether it finished
    pub on_completed: EventCallback,
}

impl ViewProps {
    /// Props with scrub value 0, zero size and no-op callbacks
    pub fn new(session: Arc<AnimationSession>) -> Self {
        Self {
            session,
            value: 0.0,
            size: Size::zero(),
            on_downloaded: noop_callback(),
            on_completed: noop_callback(),
        }
    }

    /// Set the scrub value
    #[inline]
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Set the container size
    #[inline]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the download callback
    pub fn on_downloaded(mut self, callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_downloaded = Arc::new(callback);
        self
    }

    /// Set the completion callback
    pub fn on_completed(mut self, callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_completed = Arc::new(callback);
        self
    }
}

/// A mounted animation component instance.
///
/// Owns one [`EngineController`] (and through it at most one live engine)
/// plus the subscriptions forwarding session events to the caller's
/// callbacks.
pub struct AnimationView<H: EngineHost> {
    controller: EngineController<H>,
    props: ViewProps,
    downloaded_sub: Subscription,
    completed_sub: Subscription,
}

impl<H: EngineHost + 'static> AnimationView<H> {
    /// Mount the component: subscribe the callbacks, install the session's
    /// source, start autoplay where applicable and size the engine.
    pub fn mount(props: ViewProps, host: H, scheduler: Arc<dyn Scheduler>) -> Self {
        let mut controller = EngineController::new(host, scheduler);
        let (downloaded_sub, completed_sub) = Self::subscribe(&props);
        controller.install(&props.session);
        controller.begin_autoplay(&props.session);
        controller.resize(props.size);
        Self {
            controller,
            props,
            downloaded_sub,
            completed_sub,
        }
    }

    /// Apply a new render pass.
    ///
    /// Three independent diffs, all of which may fire in one call: a
    /// structurally changed session reloads the engine (teardown before
    /// install, never two live engines); a changed scrub value forwards to
    /// the controller, engaging external control if positive; a changed size
    /// resizes in place.
    pub fn render(&mut self, mut props: ViewProps) {
        let session_changed = *props.session != *self.props.session;
        let value_changed = props.value != self.props.value;
        let size_changed = props.size != self.props.size;

        if !session_changed {
            // A structurally equal session may still be a different object;
            // the installed engine and the event subscriptions belong to the
            // original, so keep holding that one.
            props.session = Arc::clone(&self.props.session);
        }

        if session_changed {
            debug!("session changed; reloading engine");
            self.unsubscribe();
            let (downloaded_sub, completed_sub) = Self::subscribe(&props);
            self.downloaded_sub = downloaded_sub;
            self.completed_sub = completed_sub;
            self.controller.teardown();
            self.controller.install(&props.session);
            self.controller.begin_autoplay(&props.session);
        }
        if value_changed {
            self.controller.apply_external_progress(props.value);
        }
        if size_changed || session_changed {
            // A freshly installed engine has no frame yet even when the
            // container size itself did not change.
            self.controller.resize(props.size);
        }
        self.props = props;
    }

    /// Unmount the component: drop the event subscriptions and tear the
    /// engine down.
    pub fn unmount(mut self) {
        self.unsubscribe();
        self.controller.teardown();
    }

    /// Current engine clock position; 0.0 while no engine is installed
    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    /// The session rendered by the latest pass
    pub fn session(&self) -> &Arc<AnimationSession> {
        &self.props.session
    }

    /// Whether this view's controller has latched into external control
    pub fn is_externally_controlled(&self) -> bool {
        self.controller.is_externally_controlled()
    }

    fn subscribe(props: &ViewProps) -> (Subscription, Subscription) {
        let downloaded = Arc::clone(&props.on_downloaded);
        let downloaded_sub = props
            .session
            .on_downloaded
            .subscribe(move |value| downloaded(value));
        let completed = Arc::clone(&props.on_completed);
        let completed_sub = props
            .session
            .on_completed
            .subscribe(move |value| completed(value));
        (downloaded_sub, completed_sub)
    }

    fn unsubscribe(&self) {
        self.props.session.on_downloaded.unsubscribe(&self.downloaded_sub);
        self.props.session.on_completed.unsubscribe(&self.completed_sub);
    }
}
