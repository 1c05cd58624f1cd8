//! Seams implemented by the host application
//!
//! The engine never draws and never owns a renderer. Whatever map renderer the
//! host uses exposes its projection through [`Projection`], and the engine does
//! all of its screen-space work through it.

use crate::core::{
    camera::{CameraPose, ViewportSize},
    geo::{GeoCoordinate, Point},
};

/// Mapping between geographic coordinates and screen points in dp for a given
/// camera pose and viewport
pub trait Projection {
    /// Screen position of `coordinate`, or `None` if the renderer cannot place it
    /// (for example behind the horizon of a tilted camera)
    fn screen_point_of(
        &self,
        coordinate: GeoCoordinate,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<Point>;

    /// Geographic coordinate under `point`, or `None` if it hits no ground
    fn geo_coordinate_of(
        &self,
        point: Point,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<GeoCoordinate>;

    /// Pose the renderer is currently showing
    fn current_camera_pose(&self) -> CameraPose;

    /// Screen position of `coordinate` under the current pose
    fn current_screen_point_of(
        &self,
        coordinate: GeoCoordinate,
        viewport: ViewportSize,
    ) -> Option<Point> {
        self.screen_point_of(coordinate, &self.current_camera_pose(), viewport)
    }
}

impl<P: Projection + ?Sized> Projection for &P {
    fn screen_point_of(
        &self,
        coordinate: GeoCoordinate,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<Point> {
        (**self).screen_point_of(coordinate, pose, viewport)
    }

    fn geo_coordinate_of(
        &self,
        point: Point,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<GeoCoordinate> {
        (**self).geo_coordinate_of(point, pose, viewport)
    }

    fn current_camera_pose(&self) -> CameraPose {
        (**self).current_camera_pose()
    }
}
