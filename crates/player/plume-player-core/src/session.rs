//! The animation session: what to play, how to play it, and the channels
//! that report load and playback completion back to the caller.

use std::sync::Arc;

use crate::config::PlaybackConfig;
use crate::event::EventChannel;
use crate::source::AnimationSource;

/// Root entity combining a source descriptor, playback configuration and the
/// session's event channels.
///
/// A session is created by the caller before mounting and shared by
/// reference (`Arc`) into one or more views; each view keeps its own engine
/// controller and live engine, but all of them broadcast onto this session's
/// channels. The descriptive fields are immutable after construction; the
/// runtime autoplay/scrub latch lives in the controller, seeded from
/// `external_control`.
#[derive(Debug)]
pub struct AnimationSession {
    /// Where the animation data comes from
    pub source: AnimationSource,
    /// Playback parameters
    pub config: PlaybackConfig,
    /// Whether the session starts under external scrub control instead of
    /// autoplay. A controller also latches into external control the first
    /// time it observes a positive scrub value.
    pub external_control: bool,
    /// Fires exactly once per load attempt with the load outcome. Local
    /// source kinds always report success; only remote fetches report
    /// failure.
    pub on_downloaded: EventChannel<bool>,
    /// Fires once per completed autoplay cycle, with whether playback
    /// finished naturally (true) or was interrupted (false). Never fires
    /// while `LoopMode::Loop` runs uninterrupted.
    pub on_completed: EventChannel<bool>,
}

impl AnimationSession {
    /// Create a session for a source with the given configuration
    pub fn new(source: AnimationSource, config: PlaybackConfig) -> Self {
        Self {
            source,
            config,
            external_control: false,
            on_downloaded: EventChannel::new(),
            on_completed: EventChannel::new(),
        }
    }

    /// Start the session under external scrub control, disabling autoplay
    /// from the first frame
    #[inline]
    pub fn with_external_control(mut self, enabled: bool) -> Self {
        self.external_control = enabled;
        self
    }

    /// Wrap the session for sharing with views
    #[inline]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for AnimationSession {
    fn default() -> Self {
        Self::new(AnimationSource::bundled(""), PlaybackConfig::default())
    }
}

/// Structural equality over the immutable fields. Event-channel identity is
/// deliberately excluded: two sessions describing the same playback are
/// equal even though their channels are distinct objects.
impl PartialEq for AnimationSession {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.config == other.config
            && self.external_control == other.external_control
    }
}
