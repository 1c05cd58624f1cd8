//! Frame-by-frame playback of animated marker icons.
//!
//! Nothing here owns a timer. The rendering layer polls [`IconAnimator`] with
//! the current time in milliseconds and draws the frame it is told to.

use crate::animation::interpolation::{frame_progress, Interpolator};
use crate::layers::marker::MarkerViewState;

/// Which way the frames are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconDirection {
    /// First frame to last, growing into the expanded icon
    Expanding,
    /// Last frame to first, shrinking back to the resting icon
    Collapsing,
}

/// One playback of an icon's frames started at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconAnimation {
    frame_count: usize,
    frame_interval_ms: u64,
    direction: IconDirection,
    started_at_ms: u64,
}

impl IconAnimation {
    pub fn new(
        frame_count: usize,
        frame_interval_ms: u64,
        direction: IconDirection,
        started_at_ms: u64,
    ) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_interval_ms: frame_interval_ms.max(1),
            direction,
            started_at_ms,
        }
    }

    pub fn direction(&self) -> IconDirection {
        self.direction
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn step_at(&self, now_ms: u64) -> usize {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let step = usize::try_from(elapsed / self.frame_interval_ms).unwrap_or(usize::MAX);
        step.min(self.frame_count - 1)
    }

    /// Index of the frame to draw at `now_ms`
    pub fn frame_at(&self, now_ms: u64) -> usize {
        let step = self.step_at(now_ms);
        match self.direction {
            IconDirection::Expanding => step,
            IconDirection::Collapsing => self.frame_count - step - 1,
        }
    }

    /// Share of the playback completed, from 0.0 to 1.0
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.frame_count == 1 {
            return 1.0;
        }
        self.step_at(now_ms) as f64 / (self.frame_count - 1) as f64
    }

    /// True once the last frame of the playback is on screen
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.step_at(now_ms) == self.frame_count - 1
    }
}

/// Tracks the frame of one animated icon across view state changes
#[derive(Debug, Clone, PartialEq)]
pub struct IconAnimator {
    frame_count: usize,
    frame_interval_ms: u64,
    interpolator: Interpolator,
    expanded: bool,
    animation: Option<IconAnimation>,
}

impl IconAnimator {
    pub fn new(frame_count: usize, frame_interval_ms: u64) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_interval_ms,
            interpolator: Interpolator::default(),
            expanded: false,
            animation: None,
        }
    }

    /// Curve mapping frame indices to the icon's growth
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Reacts to a marker changing view state. Returns true if a playback was
    /// started; any playback in progress is replaced.
    pub fn transition(&mut self, from: MarkerViewState, to: MarkerViewState, now_ms: u64) -> bool {
        if !from.animates_to(to) {
            return false;
        }

        let expanding = to == MarkerViewState::ExpandedWithLabel;
        let direction = if expanding {
            IconDirection::Expanding
        } else {
            IconDirection::Collapsing
        };
        self.expanded = expanding;
        self.animation = Some(IconAnimation::new(
            self.frame_count,
            self.frame_interval_ms,
            direction,
            now_ms,
        ));
        true
    }

    /// Jumps straight to the resting frame of either state, cancelling playback
    pub fn settle(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.animation = None;
    }

    /// Frame to draw at `now_ms`; finished playbacks are dropped
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let frame = self.frame_at(now_ms);
        if self
            .animation
            .map_or(false, |animation| animation.is_finished(now_ms))
        {
            self.animation = None;
        }
        frame
    }

    /// Frame to draw at `now_ms` without touching state
    pub fn frame_at(&self, now_ms: u64) -> usize {
        match &self.animation {
            Some(animation) => animation.frame_at(now_ms),
            None if self.expanded => self.frame_count - 1,
            None => 0,
        }
    }

    /// Growth of the icon at `now_ms` on the interpolator's curve: 0.0 is the
    /// resting icon, 1.0 the expanded one. Overshooting curves leave [0, 1]
    /// mid-playback.
    pub fn progress_at(&self, now_ms: u64) -> f64 {
        frame_progress(self.frame_at(now_ms), self.frame_count, self.interpolator)
    }

    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.animation
            .map_or(false, |animation| !animation.is_finished(now_ms))
    }
}
