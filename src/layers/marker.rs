use crate::animation::icon::IconAnimator;
use crate::animation::interpolation::{frame_count, frame_progressions};
use crate::core::bounds::ScreenRect;
use crate::core::config::AnimationConfig;
use crate::core::geo::{GeoCoordinate, Point};
use serde::{Deserialize, Serialize};

/// How a marker is currently presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerViewState {
    /// Pin only, label hidden
    PinOnly,
    /// Pin with its label underneath
    #[default]
    PinAndLabel,
    /// Selected: expanded icon with its label, drawn above everything else
    ExpandedWithLabel,
}

impl MarkerViewState {
    /// Draw order, higher on top
    pub fn z_index(&self) -> f32 {
        match self {
            MarkerViewState::PinOnly => 0.0,
            MarkerViewState::PinAndLabel => 1.0,
            MarkerViewState::ExpandedWithLabel => 2.0,
        }
    }

    pub fn label_visible(&self) -> bool {
        *self != MarkerViewState::PinOnly
    }

    pub fn is_expanded(&self) -> bool {
        *self == MarkerViewState::ExpandedWithLabel
    }

    /// Icons animate when entering or leaving the expanded state
    pub fn animates_to(&self, next: MarkerViewState) -> bool {
        *self != next && (self.is_expanded() || next.is_expanded())
    }
}

/// Width and height in dp
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen density, physical pixels per dp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density(pub f64);

impl Density {
    pub fn px_to_dp(&self, px: f64) -> f64 {
        if self.0 > 0.0 {
            px / self.0
        } else {
            px
        }
    }

    pub fn dp_to_px(&self, dp: f64) -> f64 {
        if self.0 > 0.0 {
            dp * self.0
        } else {
            dp
        }
    }

    pub fn point_to_dp(&self, point: Point) -> Point {
        Point::new(self.px_to_dp(point.x), self.px_to_dp(point.y))
    }
}

impl Default for Density {
    fn default() -> Self {
        Density(1.0)
    }
}

/// Icon description the layout needs; pixels are the rendering layer's business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerIcon {
    Static {
        size: Size,
    },
    /// Frames grow from `collapsed` to `expanded` over `duration_ms`
    Animated {
        collapsed: Size,
        expanded: Size,
        duration_ms: u64,
    },
}

impl MarkerIcon {
    /// Icon size for the expanded (last frame) or resting (first frame) state
    pub fn size(&self, expanded: bool) -> Size {
        match self {
            MarkerIcon::Static { size } => *size,
            MarkerIcon::Animated {
                collapsed,
                expanded: expanded_size,
                ..
            } => {
                if expanded {
                    *expanded_size
                } else {
                    *collapsed
                }
            }
        }
    }

    pub fn frame_count(&self, config: &AnimationConfig) -> usize {
        match self {
            MarkerIcon::Static { .. } => 1,
            MarkerIcon::Animated { duration_ms, .. } => {
                frame_count(*duration_ms, config.frame_interval_ms())
            }
        }
    }

    /// Growth of the icon in each frame, 0.0 for the collapsed size and 1.0
    /// for the expanded one. The rendering layer draws frame `i` at
    /// `collapsed + (expanded - collapsed) * progress[i]`.
    pub fn frame_progressions(&self, config: &AnimationConfig) -> Vec<f64> {
        match self {
            MarkerIcon::Static { .. } => vec![1.0],
            MarkerIcon::Animated { duration_ms, .. } => {
                frame_progressions(*duration_ms, config.frame_interval_ms(), config.interpolator)
            }
        }
    }

    /// Animator for animated icons, `None` for static ones
    pub fn animator(&self, config: &AnimationConfig) -> Option<IconAnimator> {
        match self {
            MarkerIcon::Static { .. } => None,
            MarkerIcon::Animated { .. } => Some(
                IconAnimator::new(self.frame_count(config), config.frame_interval_ms())
                    .with_interpolator(config.interpolator),
            ),
        }
    }
}

/// Everything the engine knows about one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec<K> {
    pub id: K,
    pub position: GeoCoordinate,
    pub icon: MarkerIcon,
    /// Measured label size, `None` for markers without a label
    pub label_size: Option<Size>,
}

impl<K> MarkerSpec<K> {
    pub fn new(id: K, position: GeoCoordinate, icon: MarkerIcon) -> Self {
        Self {
            id,
            position,
            icon,
            label_size: None,
        }
    }

    pub fn with_label(mut self, label_size: Size) -> Self {
        self.label_size = Some(label_size);
        self
    }
}

/// Pin rectangle for a marker anchored at its bottom center
pub fn pin_bounds(anchor: Point, icon: Size) -> ScreenRect {
    ScreenRect::new(
        anchor.x - icon.width / 2.0,
        anchor.y - icon.height,
        anchor.x + icon.width / 2.0,
        anchor.y,
    )
}

/// Label rectangle, centered horizontally directly below the anchor
pub fn label_bounds(anchor: Point, label: Size) -> ScreenRect {
    ScreenRect::new(
        anchor.x - label.width / 2.0,
        anchor.y,
        anchor.x + label.width / 2.0,
        anchor.y + label.height,
    )
}
