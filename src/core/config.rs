//! Configuration for the viewport, label and selection engine
//!
//! Settings are grouped per concern and can be picked from a preset
//! ([`EngineProfile`]) or loaded from JSON. Every group falls back to its
//! defaults for missing fields.

use crate::animation::interpolation::Interpolator;
use crate::core::camera::ZoomLimits;
use crate::core::constants::{
    ICON_FRAME_RATE, LABEL_REFRESH_THROTTLE_MS, SET_SIMILARITY_THRESHOLD,
    TOUCH_DISTANCE_THRESHOLD_DP,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineProfile {
    Standard,
    /// Many small markers close together: tighter touch box, faster label refresh
    Dense,
    /// Few large markers: generous touch box, fewer label refreshes
    Relaxed,
    Custom(EngineConfig),
}

impl EngineProfile {
    pub fn resolve(&self) -> EngineConfig {
        match self {
            Self::Standard => EngineConfig {
                zoom: ZoomLimits::default(),
                selection: SelectionConfig {
                    touch_threshold_dp: TOUCH_DISTANCE_THRESHOLD_DP,
                    similarity_threshold: SET_SIMILARITY_THRESHOLD,
                },
                labels: LabelConfig {
                    refresh_throttle_ms: LABEL_REFRESH_THROTTLE_MS,
                },
                animation: AnimationConfig {
                    frame_rate: ICON_FRAME_RATE,
                    interpolator: Interpolator::anticipate_overshoot(),
                },
            },
            Self::Dense => EngineConfig {
                zoom: ZoomLimits::default(),
                selection: SelectionConfig {
                    touch_threshold_dp: 24.0,
                    similarity_threshold: SET_SIMILARITY_THRESHOLD,
                },
                labels: LabelConfig {
                    refresh_throttle_ms: 50,
                },
                animation: AnimationConfig {
                    frame_rate: ICON_FRAME_RATE,
                    interpolator: Interpolator::Linear,
                },
            },
            Self::Relaxed => EngineConfig {
                zoom: ZoomLimits::new(3.0, 20.0),
                selection: SelectionConfig {
                    touch_threshold_dp: 48.0,
                    similarity_threshold: SET_SIMILARITY_THRESHOLD,
                },
                labels: LabelConfig {
                    refresh_throttle_ms: 200,
                },
                animation: AnimationConfig {
                    frame_rate: 30,
                    interpolator: Interpolator::anticipate_overshoot(),
                },
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub zoom: ZoomLimits,
    pub selection: SelectionConfig,
    pub labels: LabelConfig,
    pub animation: AnimationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineProfile::default().resolve()
    }
}

impl EngineConfig {
    /// Parses a JSON document and validates the result
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("loaded engine config: {:?}", config);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if !(zoom.min_zoom.is_finite() && zoom.max_zoom.is_finite()) || zoom.min_zoom > zoom.max_zoom
        {
            return Err(MapError::InvalidConfig(format!(
                "zoom range [{}, {}] is empty",
                zoom.min_zoom, zoom.max_zoom
            )));
        }
        if !(self.selection.touch_threshold_dp.is_finite() && self.selection.touch_threshold_dp >= 0.0)
        {
            return Err(MapError::InvalidConfig(format!(
                "touch threshold {} must be a non-negative number of dp",
                self.selection.touch_threshold_dp
            )));
        }
        if !(0.0..=1.0).contains(&self.selection.similarity_threshold) {
            return Err(MapError::InvalidConfig(format!(
                "similarity threshold {} must be within [0, 1]",
                self.selection.similarity_threshold
            )));
        }
        if self.animation.frame_rate == 0 {
            return Err(MapError::InvalidConfig(
                "animation frame rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tap disambiguation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Half-width of the square around a tap that counts as touching a pin
    pub touch_threshold_dp: f64,
    /// Share of the touched markers that must repeat the previous tap to keep cycling
    pub similarity_threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        EngineProfile::Standard.resolve().selection
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub refresh_throttle_ms: u64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        EngineProfile::Standard.resolve().labels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_rate: u32,
    pub interpolator: Interpolator,
}

impl AnimationConfig {
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.frame_rate.max(1))
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        EngineProfile::Standard.resolve().animation
    }
}
