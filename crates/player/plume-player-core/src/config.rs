//! Immutable playback configuration: speed, loop behavior, play range, layout.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::layout::FitMode;

/// Defines how autoplay traverses the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopMode {
    /// Play the range once and stop at the end.
    Once,
    /// Loop the range indefinitely.
    Loop,
    /// Play forward then backward, once.
    AutoReverse,
    /// Play the range a fixed number of cycles, then stop.
    Repeat(u32),
}

impl LoopMode {
    /// Get the name of this loop mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Loop => "loop",
            Self::AutoReverse => "auto_reverse",
            Self::Repeat(_) => "repeat",
        }
    }

    /// Check whether playback in this mode terminates on its own.
    /// `Loop` only ends when explicitly stopped, so its completion
    /// callback never fires naturally.
    #[inline]
    pub fn is_finite(&self) -> bool {
        !matches!(self, Self::Loop)
    }
}

impl Default for LoopMode {
    fn default() -> Self {
        LoopMode::Loop
    }
}

/// Fractional progress bounds for autoplay. Both endpoints live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRange {
    from: f32,
    to: f32,
}

impl ProgressRange {
    /// Create a range, validating that both endpoints are finite and in [0, 1]
    pub fn new(from: f32, to: f32) -> Result<Self, PlayerError> {
        let valid = |value: f32| value.is_finite() && (0.0..=1.0).contains(&value);
        if !valid(from) || !valid(to) {
            return Err(PlayerError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// The full 0 → 1 range
    #[inline]
    pub fn full() -> Self {
        Self { from: 0.0, to: 1.0 }
    }

    /// Start progress of the range
    #[inline]
    pub fn from(&self) -> f32 {
        self.from
    }

    /// End progress of the range
    #[inline]
    pub fn to(&self) -> f32 {
        self.to
    }
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Immutable playback parameters attached to an animation session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Multiplier on the engine's internal clock
    pub speed: f32,
    /// Loop behavior for autoplay
    pub loop_mode: LoopMode,
    /// Fractional progress bounds for autoplay
    pub range: ProgressRange,
    /// Layout of engine content inside its container
    pub fit_mode: FitMode,
}

impl PlaybackConfig {
    /// Create a new default configuration
    #[inline]
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            loop_mode: LoopMode::default(),
            range: ProgressRange::default(),
            fit_mode: FitMode::default(),
        }
    }

    /// Set playback speed. Negative speeds play in reverse; the engine owns
    /// their interpretation. Non-finite speeds are rejected.
    #[inline]
    pub fn with_speed(mut self, speed: f32) -> Result<Self, PlayerError> {
        if !speed.is_finite() {
            return Err(PlayerError::InvalidSpeed { speed });
        }
        self.speed = speed;
        Ok(self)
    }

    /// Set the loop mode
    #[inline]
    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Set the autoplay progress range
    #[inline]
    pub fn with_range(mut self, range: ProgressRange) -> Self {
        self.range = range;
        self
    }

    /// Set the content fit mode
    #[inline]
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.loop_mode, LoopMode::Loop);
        assert_eq!(config.range, ProgressRange::full());
        assert_eq!(config.fit_mode, FitMode::Fit);
    }

    #[test]
    fn test_range_validation() {
        assert!(ProgressRange::new(0.2, 0.8).is_ok());
        assert!(ProgressRange::new(-0.1, 0.8).is_err());
        assert!(ProgressRange::new(0.0, 1.5).is_err());
        assert!(ProgressRange::new(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_builder() {
        let config = PlaybackConfig::new()
            .with_speed(2.0)
            .unwrap()
            .with_loop_mode(LoopMode::Once)
            .with_range(ProgressRange::new(0.25, 0.75).unwrap())
            .with_fit_mode(FitMode::Stretch);
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.loop_mode, LoopMode::Once);
        assert_eq!(config.range.from(), 0.25);
        assert_eq!(config.fit_mode, FitMode::Stretch);
    }

    #[test]
    fn test_speed_validation() {
        assert!(PlaybackConfig::new().with_speed(-1.5).is_ok());
        assert!(matches!(
            PlaybackConfig::new().with_speed(f32::NAN),
            Err(PlayerError::InvalidSpeed { .. })
        ));
    }

    #[test]
    fn test_loop_mode_finiteness() {
        assert!(LoopMode::Once.is_finite());
        assert!(LoopMode::AutoReverse.is_finite());
        assert!(LoopMode::Repeat(3).is_finite());
        assert!(!LoopMode::Loop.is_finite());
    }
}
