//! Semantic map regions and their conversion to and from renderer camera poses.
//!
//! A [`MapBounds`] says *what* should be visible: a center, a horizontal and a
//! vertical radius, rotation, tilt, the share of the viewport hidden behind
//! overlaid UI ([`Padding`]) and how to reconcile the two radii with the
//! viewport's aspect ratio ([`ScaleStrategy`]). A [`CameraPose`] is what the
//! renderer understands: a target, a zoom, a bearing and a tilt.
//!
//! Distances are turned into degrees with a flat-earth approximation. The
//! longitude stretch uses [`LONGITUDE_CORRECTION_FACTOR`] in both directions so
//! that round trips through the padding transform are exact.

use crate::core::camera::{CameraPose, ViewportSize, ZoomLimits};
use crate::core::constants::{
    BASE_TILE_SIZE_DP, DEFAULT_PADDING_PROPORTION, DEFAULT_RADIUS_METERS,
    EARTH_CIRCUMFERENCE_METERS, EARTH_HALF_CIRCUMFERENCE_METERS, EARTH_LATITUDE_DEGREES,
    EARTH_LONGITUDE_DEGREES, LONGITUDE_CORRECTION_FACTOR, MIN_RADIUS_METERS,
    MIN_VISIBLE_FRACTION,
};
use crate::core::geo::GeoCoordinate;
use crate::core::units::Length;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Proportion of the viewport covered by overlaid UI on each side.
/// 0.05 means 5% of the respective width or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub const NONE: Padding = Padding::uniform(0.0);
    pub const DEFAULT: Padding = Padding::uniform(DEFAULT_PADDING_PROPORTION);

    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub const fn uniform(proportion: f64) -> Self {
        Self::new(proportion, proportion, proportion, proportion)
    }

    /// Each side clamped to [0, 1]; NaN counts as no padding
    pub fn sanitized(&self) -> Padding {
        let fix = |value: f64| if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Padding::new(fix(self.top), fix(self.bottom), fix(self.left), fix(self.right))
    }

    /// Share of the viewport width left visible, clipped to [0, 1]
    pub fn visible_fraction_x(&self) -> f64 {
        let padding = self.sanitized();
        (1.0 - padding.left - padding.right).clamp(0.0, 1.0)
    }

    /// Share of the viewport height left visible, clipped to [0, 1]
    pub fn visible_fraction_y(&self) -> f64 {
        let padding = self.sanitized();
        (1.0 - padding.top - padding.bottom).clamp(0.0, 1.0)
    }

    /// How far the middle of the visible area sits from the middle of the
    /// viewport, as a proportion of the width (positive = to the right)
    fn midpoint_shift_x(&self) -> f64 {
        let padding = self.sanitized();
        (1.0 + padding.left - padding.right) / 2.0 - 0.5
    }

    /// Same as [`Self::midpoint_shift_x`] for the height (positive = downwards)
    fn midpoint_shift_y(&self) -> f64 {
        let padding = self.sanitized();
        (1.0 + padding.top - padding.bottom) / 2.0 - 0.5
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Policy for turning a horizontal and a vertical radius into one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleStrategy {
    /// Scale using the horizontal radius
    Width,
    /// Scale using the vertical radius
    Height,
    /// Smaller radius wins, the whole region stays visible ("contain")
    #[default]
    Fit,
    /// Larger radius wins, the region covers the viewport ("cover")
    Fill,
}

impl ScaleStrategy {
    pub fn pick_radius(&self, radius_x: Length, radius_y: Length) -> Length {
        match self {
            ScaleStrategy::Width => radius_x,
            ScaleStrategy::Height => radius_y,
            ScaleStrategy::Fit => radius_x.min(radius_y),
            ScaleStrategy::Fill => radius_x.max(radius_y),
        }
    }

    pub fn pick_zoom(&self, zoom_x: f64, zoom_y: f64) -> f64 {
        match self {
            ScaleStrategy::Width => zoom_x,
            ScaleStrategy::Height => zoom_y,
            ScaleStrategy::Fit => zoom_x.min(zoom_y),
            ScaleStrategy::Fill => zoom_x.max(zoom_y),
        }
    }

    /// Axis whose zoom `pick_zoom` would select, judged from meters per dp on
    /// each axis (a larger scale means a lower zoom)
    fn governing_axis(&self, meters_per_dp_x: f64, meters_per_dp_y: f64) -> Axis {
        let horizontal = match self {
            ScaleStrategy::Width => true,
            ScaleStrategy::Height => false,
            ScaleStrategy::Fit => meters_per_dp_x >= meters_per_dp_y,
            ScaleStrategy::Fill => meters_per_dp_x <= meters_per_dp_y,
        };
        if horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A geographic region to show on the map.
///
/// Immutable: every `with_*` method returns a new value. Radii are always
/// strictly positive, the bearing is normalized to [0, 360) and the tilt is
/// clamped to [0, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    center: GeoCoordinate,
    radius_x: Length,
    radius_y: Length,
    bearing: f64,
    tilt: f64,
    padding: Padding,
    scale_strategy: ScaleStrategy,
}

impl MapBounds {
    pub fn new(
        center: GeoCoordinate,
        radius_x: Length,
        radius_y: Length,
        bearing: f64,
        tilt: f64,
        padding: Padding,
        scale_strategy: ScaleStrategy,
    ) -> Self {
        Self {
            center,
            radius_x: sanitize_radius(radius_x),
            radius_y: sanitize_radius(radius_y),
            bearing: normalize_bearing(bearing),
            tilt: if tilt.is_nan() { 0.0 } else { tilt.clamp(0.0, 90.0) },
            padding,
            scale_strategy,
        }
    }

    /// Bounds around `center` with the default 7.5 km radius, no rotation,
    /// 5% padding and [`ScaleStrategy::Fit`]
    pub fn from_center(center: GeoCoordinate) -> Self {
        Self::from_center_with_radius(center, Length::meters(DEFAULT_RADIUS_METERS))
    }

    pub fn from_center_with_radius(center: GeoCoordinate, radius: Length) -> Self {
        Self::new(
            center,
            radius,
            radius,
            0.0,
            0.0,
            Padding::DEFAULT,
            ScaleStrategy::Fit,
        )
    }

    /// Reads the bounds currently shown by a camera, with no padding and
    /// [`ScaleStrategy::Fit`]
    pub fn from_camera_pose(pose: &CameraPose, viewport: ViewportSize) -> Self {
        let viewport = viewport.sanitized();
        let latitude = pose.target.latitude;
        Self::new(
            pose.target,
            distance_for_zoom(latitude, viewport.width, pose.zoom) / 2.0,
            distance_for_zoom(latitude, viewport.height, pose.zoom) / 2.0,
            pose.bearing,
            pose.tilt,
            Padding::NONE,
            ScaleStrategy::Fit,
        )
    }

    /// Reads the bounds currently visible outside of `padding`.
    ///
    /// Used to capture what the user sees before overlaid UI changes size:
    /// feeding the result back through [`MapBounds::to_camera_pose`] yields the
    /// original pose.
    pub fn from_camera_pose_excluding_padding(
        pose: &CameraPose,
        scale_strategy: ScaleStrategy,
        padding: Padding,
        viewport: ViewportSize,
    ) -> Self {
        let viewport = viewport.sanitized();
        let unpadded = Self::from_camera_pose(pose, viewport);

        // The unpadded radii are the real camera extents, so they give the
        // screen distances directly.
        let (lat_offset, long_offset) = padding_offset(
            unpadded.bearing,
            &padding,
            unpadded.radius_x * 2.0,
            unpadded.radius_y * 2.0,
        );
        let target = GeoCoordinate::new(
            unpadded.center.latitude - lat_offset,
            unpadded.center.longitude - long_offset,
        )
        .normalized();

        Self::new(
            target,
            unpadded.radius_x * padding.visible_fraction_x(),
            unpadded.radius_y * padding.visible_fraction_y(),
            pose.bearing,
            pose.tilt,
            padding,
            scale_strategy,
        )
    }

    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    pub fn radius_x(&self) -> Length {
        self.radius_x
    }

    pub fn radius_y(&self) -> Length {
        self.radius_y
    }

    /// Radius selected by the scale strategy
    pub fn radius(&self) -> Length {
        self.scale_strategy.pick_radius(self.radius_x, self.radius_y)
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn scale_strategy(&self) -> ScaleStrategy {
        self.scale_strategy
    }

    pub fn with_center(&self, center: GeoCoordinate) -> Self {
        Self { center, ..*self }
    }

    /// Replaces both radii with `radius`
    pub fn with_radius(&self, radius: Length) -> Self {
        Self::new(
            self.center,
            radius,
            radius,
            self.bearing,
            self.tilt,
            self.padding,
            self.scale_strategy,
        )
    }

    pub fn with_radii(&self, radius_x: Length, radius_y: Length) -> Self {
        Self::new(
            self.center,
            radius_x,
            radius_y,
            self.bearing,
            self.tilt,
            self.padding,
            self.scale_strategy,
        )
    }

    pub fn with_bearing(&self, bearing: f64) -> Self {
        Self {
            bearing: normalize_bearing(bearing),
            ..*self
        }
    }

    pub fn with_tilt(&self, tilt: f64) -> Self {
        Self::new(
            self.center,
            self.radius_x,
            self.radius_y,
            self.bearing,
            tilt,
            self.padding,
            self.scale_strategy,
        )
    }

    pub fn with_padding(&self, padding: Padding) -> Self {
        Self { padding, ..*self }
    }

    pub fn with_scale_strategy(&self, scale_strategy: ScaleStrategy) -> Self {
        Self {
            scale_strategy,
            ..*self
        }
    }

    /// North-west and south-east corners around the center at the resolved
    /// radius. Bearing is ignored, so for rotated bounds this is only the
    /// axis-aligned approximation. Corners past a pole are clamped to it and
    /// corners past the antimeridian wrap around.
    pub fn corners(&self) -> (GeoCoordinate, GeoCoordinate) {
        let radius = self.radius();
        let lat_delta = lat_from_distance(radius);
        let long_delta = long_from_distance(radius);
        (
            GeoCoordinate::new(
                self.center.latitude + lat_delta,
                self.center.longitude - long_delta,
            )
            .normalized(),
            GeoCoordinate::new(
                self.center.latitude - lat_delta,
                self.center.longitude + long_delta,
            )
            .normalized(),
        )
    }

    /// Camera pose showing these bounds, zoom clamped to the default limits
    pub fn to_camera_pose(&self, viewport: ViewportSize) -> CameraPose {
        self.to_camera_pose_within(viewport, &ZoomLimits::default())
    }

    /// Camera pose showing these bounds, zoom clamped to `limits`
    pub fn to_camera_pose_within(&self, viewport: ViewportSize, limits: &ZoomLimits) -> CameraPose {
        let viewport = viewport.sanitized();
        let radius = self.radius();

        // The padded region must be larger than the target region so that the
        // part left after cropping is exactly the requested one.
        let radius_x = radius / self.padding.visible_fraction_x().max(MIN_VISIBLE_FRACTION);
        let radius_y = radius / self.padding.visible_fraction_y().max(MIN_VISIBLE_FRACTION);

        let axis = self.scale_strategy.governing_axis(
            radius_x.as_meters() / viewport.width,
            radius_y.as_meters() / viewport.height,
        );
        let (screen_distance_x, screen_distance_y) = match axis {
            Axis::Horizontal => (radius_x * 2.0, radius_x * 2.0 * (viewport.height / viewport.width)),
            Axis::Vertical => (radius_y * 2.0 * (viewport.width / viewport.height), radius_y * 2.0),
        };

        let (lat_offset, long_offset) = padding_offset(
            self.bearing,
            &self.padding,
            screen_distance_x,
            screen_distance_y,
        );
        let target = GeoCoordinate::new(
            self.center.latitude + lat_offset,
            self.center.longitude + long_offset,
        )
        .normalized();

        let zoom_x = zoom_for_distance(target.latitude, viewport.width, radius_x * 2.0);
        let zoom_y = zoom_for_distance(target.latitude, viewport.height, radius_y * 2.0);
        let zoom = self.scale_strategy.pick_zoom(zoom_x, zoom_y);
        let clamped = limits.clamp(zoom);
        if clamped != zoom {
            log::debug!(
                "zoom {:.3} clamped to {:.3} (radius {})",
                zoom,
                clamped,
                radius
            );
        }

        CameraPose::new(target, clamped, self.bearing, self.tilt)
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self::from_center(GeoCoordinate::default())
    }
}

fn sanitize_radius(radius: Length) -> Length {
    if radius.is_finite() && radius.as_meters() > 0.0 {
        radius
    } else {
        Length::meters(MIN_RADIUS_METERS)
    }
}

fn normalize_bearing(bearing: f64) -> f64 {
    if bearing.is_finite() {
        let normalized = bearing.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if normalized >= 360.0 {
            0.0
        } else {
            normalized
        }
    } else {
        0.0
    }
}

/// Latitude/longitude shift between the center of the visible (unpadded) area
/// and the center of the viewport, given the ground distance the viewport spans
/// on each screen axis.
fn padding_offset(
    bearing: f64,
    padding: &Padding,
    screen_distance_x: Length,
    screen_distance_y: Length,
) -> (f64, f64) {
    distance_to_lat_long_offset(
        bearing,
        screen_distance_x * padding.midpoint_shift_x(),
        screen_distance_y * padding.midpoint_shift_y(),
    )
}

/// Rotates a screen-relative shift by `-bearing` so it is expressed relative to
/// the map, then converts it to degrees.
fn distance_to_lat_long_offset(bearing: f64, shift_x: Length, shift_y: Length) -> (f64, f64) {
    let rotation = -bearing.to_radians();

    let lat_distance =
        shift_x * (rotation + FRAC_PI_2).cos() + shift_y * rotation.cos();
    let long_distance =
        shift_x * (rotation + FRAC_PI_2).sin() + shift_y * rotation.sin();

    (
        lat_from_distance(lat_distance),
        -long_from_distance(long_distance),
    )
}

fn lat_from_distance(distance: Length) -> f64 {
    EARTH_LATITUDE_DEGREES * distance.as_meters() / EARTH_HALF_CIRCUMFERENCE_METERS
}

fn long_from_distance(distance: Length) -> f64 {
    LONGITUDE_CORRECTION_FACTOR * EARTH_LONGITUDE_DEGREES * distance.as_meters()
        / EARTH_CIRCUMFERENCE_METERS
}

/// Mercator scale at `latitude`
fn mercator_distortion_correction(latitude: f64) -> f64 {
    latitude.to_radians().cos().max(0.0)
}

fn zoom_for_distance(latitude: f64, screen_dimension_dp: f64, distance: Length) -> f64 {
    (screen_dimension_dp * mercator_distortion_correction(latitude) * EARTH_CIRCUMFERENCE_METERS
        / (distance.as_meters() * BASE_TILE_SIZE_DP))
        .log2()
}

fn distance_for_zoom(latitude: f64, screen_dimension_dp: f64, zoom: f64) -> Length {
    Length::meters(
        EARTH_CIRCUMFERENCE_METERS * screen_dimension_dp * mercator_distortion_correction(latitude)
            / (BASE_TILE_SIZE_DP * 2_f64.powf(zoom)),
    )
}
