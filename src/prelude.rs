//! Prelude module for common mapframe types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapframe::prelude::*;`

pub use crate::core::{
    bounds::ScreenRect,
    camera::{CameraPose, MovementReason, MovementState, ViewportSize, ZoomLimits},
    config::{AnimationConfig, EngineConfig, EngineProfile, LabelConfig, SelectionConfig},
    geo::{GeoCoordinate, Point},
    units::{Length, LengthUnit},
    viewport::{MapBounds, Padding, ScaleStrategy},
};

pub use crate::layers::marker::{Density, MarkerIcon, MarkerSpec, MarkerViewState, Size};

pub use crate::input::selection::{SelectionDisambiguator, TouchCandidate};

pub use crate::spatial::{
    index::RectIndex,
    overlap::{resolve_visible_labels, LabelCandidate},
};

pub use crate::animation::{
    icon::{IconAnimation, IconAnimator, IconDirection},
    interpolation::Interpolator,
};

pub use crate::session::{LabelRefresh, LabelRefreshThrottle, MapSession, TapOutcome, ViewStateChange};

pub use crate::traits::Projection;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
