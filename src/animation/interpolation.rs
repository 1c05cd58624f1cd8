use crate::core::constants::DEFAULT_ANTICIPATE_OVERSHOOT_TENSION;
use serde::{Deserialize, Serialize};

/// Time curves used to spread icon frames over an animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interpolator {
    Linear,
    /// Pulls back before starting, overshoots the end, then settles.
    /// The effective tension is `tension * 1.5`.
    AnticipateOvershoot { tension: f64 },
}

impl Interpolator {
    pub fn anticipate_overshoot() -> Self {
        Interpolator::AnticipateOvershoot {
            tension: DEFAULT_ANTICIPATE_OVERSHOOT_TENSION,
        }
    }

    /// Apply the curve to a normalized time value (0.0 to 1.0). Curves that
    /// overshoot may leave [0, 1] between the endpoints.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::AnticipateOvershoot { tension } => {
                let s = tension * 1.5;
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, s)
                } else {
                    0.5 * (overshoot(t * 2.0 - 2.0, s) + 2.0)
                }
            }
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::anticipate_overshoot()
    }
}

fn anticipate(t: f64, tension: f64) -> f64 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot(t: f64, tension: f64) -> f64 {
    t * t * ((tension + 1.0) * t + tension)
}

/// Number of frames in an animation lasting `duration_ms`, one frame per
/// `frame_interval_ms`, first and last frame included
pub fn frame_count(duration_ms: u64, frame_interval_ms: u64) -> usize {
    let steps = duration_ms / frame_interval_ms.max(1);
    usize::try_from(steps).map_or(usize::MAX, |steps| steps.saturating_add(1))
}

/// Curve value for frame `frame` out of `frame_count`. A single frame is the
/// finished state.
pub fn frame_progress(frame: usize, frame_count: usize, interpolator: Interpolator) -> f64 {
    if frame_count <= 1 {
        return interpolator.apply(1.0);
    }
    interpolator.apply(frame.min(frame_count - 1) as f64 / (frame_count - 1) as f64)
}

/// Progress value for every frame of an animation lasting `duration_ms`, for
/// rasterizing the frames ahead of playback
pub fn frame_progressions(duration_ms: u64, frame_interval_ms: u64, interpolator: Interpolator) -> Vec<f64> {
    let count = frame_count(duration_ms, frame_interval_ms);
    (0..count)
        .map(|frame| frame_progress(frame, count, interpolator))
        .collect()
}
