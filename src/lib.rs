//! # mapframe
//!
//! A platform-independent viewport and marker-layout engine for interactive
//! maps.
//!
//! The crate does no drawing. It converts between a semantic description of the
//! visible region ([`MapBounds`]) and the camera pose a map renderer
//! understands ([`CameraPose`]), picks which marker labels fit on screen
//! without overlapping, and turns an ambiguous tap among stacked pins into a
//! single selection. The renderer is reached only through the
//! [`traits::Projection`] trait implemented by the host.

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod session;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::ScreenRect,
    camera::{CameraPose, MovementReason, MovementState, ViewportSize, ZoomLimits},
    config::{EngineConfig, EngineProfile},
    geo::{GeoCoordinate, Point},
    units::{Length, LengthUnit},
    viewport::{MapBounds, Padding, ScaleStrategy},
};

pub use crate::layers::marker::{MarkerIcon, MarkerSpec, MarkerViewState};

pub use crate::input::selection::{SelectionDisambiguator, TouchCandidate};

pub use crate::spatial::overlap::{resolve_visible_labels, LabelCandidate};

pub use crate::animation::{icon::IconAnimator, interpolation::Interpolator};

pub use crate::session::{LabelRefresh, LabelRefreshThrottle, MapSession, TapOutcome, ViewStateChange};

pub use crate::traits::Projection;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs an `env_logger` backend reading `RUST_LOG`. Safe to call more than
/// once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
