//! Geometry and layout types shared by the controller and the view adapter.

use serde::{Deserialize, Serialize};

/// Size of the container hosting an animation engine, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Check whether either dimension is zero or negative
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Frame rectangle assigned to a live engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rect
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `size` with its origin at zero. Engine frames always
    /// fill their container, so this is the only rect the controller builds.
    #[inline]
    pub fn at_origin(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// The size of this rect
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Defines how engine content is laid out inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitMode {
    /// Scale preserving aspect ratio until the content fits
    Fit,
    /// Scale preserving aspect ratio until the container is covered
    Fill,
    /// Scale each axis independently to match the container exactly
    Stretch,
}

impl FitMode {
    /// Get the name of this fit mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Stretch => "stretch",
        }
    }
}

impl Default for FitMode {
    fn default() -> Self {
        FitMode::Fit
    }
}
