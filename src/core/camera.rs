use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MIN_VIEWPORT_DIMENSION_DP};
use crate::core::geo::GeoCoordinate;
use serde::{Deserialize, Serialize};

/// Camera state understood by the renderer's projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Geographic point at the center of the viewport
    pub target: GeoCoordinate,
    /// Log2 scale of the world, 0 = whole world in one base tile
    pub zoom: f64,
    /// Rotation in degrees clockwise from north
    pub bearing: f64,
    /// Angle in degrees between the camera and the ground normal
    pub tilt: f64,
}

impl CameraPose {
    pub fn new(target: GeoCoordinate, zoom: f64, bearing: f64, tilt: f64) -> Self {
        Self {
            target,
            zoom,
            bearing,
            tilt,
        }
    }

    /// Returns a copy with the zoom clamped to `limits`
    pub fn clamped(&self, limits: &ZoomLimits) -> Self {
        Self {
            zoom: limits.clamp(self.zoom),
            ..*self
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(GeoCoordinate::default(), DEFAULT_MIN_ZOOM, 0.0, 0.0)
    }
}

/// Zoom range a camera pose is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ZoomLimits {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self { min_zoom, max_zoom }
    }

    /// Clamps `zoom` into the range. NaN falls back to the minimum.
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

/// Size of the map viewport in dp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replaces zero, negative or non-finite dimensions with a 1 dp minimum so
    /// transient layouts never poison the zoom math.
    pub fn sanitized(&self) -> Self {
        let fix = |value: f64| {
            if value.is_finite() && value >= MIN_VIEWPORT_DIMENSION_DP {
                value
            } else {
                MIN_VIEWPORT_DIMENSION_DP
            }
        };
        Self::new(fix(self.width), fix(self.height))
    }

    pub fn is_degenerate(&self) -> bool {
        *self != self.sanitized()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// What started a camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementReason {
    Unknown,
    Gesture,
    ApiAnimation,
    DeveloperAnimation,
}

/// Phase of a camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    Started,
    Idle,
}
