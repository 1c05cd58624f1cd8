//! Shared fixtures for the integration tests

#![allow(dead_code)]

use mapframe::prelude::*;
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6_378_137.0;

/// North-up Web Mercator (EPSG:3857) projection with 256 dp tiles
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    pub pose: CameraPose,
}

impl WebMercator {
    pub fn new(latitude: f64, longitude: f64, zoom: f64) -> Self {
        Self {
            pose: CameraPose::new(GeoCoordinate::new(latitude, longitude), zoom, 0.0, 0.0),
        }
    }

    /// World pixel position of `coordinate` at `zoom`
    pub fn project(coordinate: GeoCoordinate, zoom: f64) -> Point {
        let scale = 256.0 * 2_f64.powf(zoom);
        let x = coordinate.longitude.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + coordinate.latitude.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale,
            (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale,
        )
    }

    /// Inverse of [`WebMercator::project`]
    pub fn unproject(pixel: Point, zoom: f64) -> GeoCoordinate {
        let scale = 256.0 * 2_f64.powf(zoom);
        let x = (pixel.x / scale) * (2.0 * PI * EARTH_RADIUS) - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * (2.0 * PI * EARTH_RADIUS);
        GeoCoordinate::new(
            (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
            (x / EARTH_RADIUS).to_degrees(),
        )
    }
}

impl Projection for WebMercator {
    fn screen_point_of(
        &self,
        coordinate: GeoCoordinate,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<Point> {
        let origin = Self::project(pose.target, pose.zoom);
        let point = Self::project(coordinate, pose.zoom).subtract(&origin);
        Some(Point::new(point.x + viewport.width / 2.0, point.y + viewport.height / 2.0))
    }

    fn geo_coordinate_of(
        &self,
        point: Point,
        pose: &CameraPose,
        viewport: ViewportSize,
    ) -> Option<GeoCoordinate> {
        let origin = Self::project(pose.target, pose.zoom);
        let offset = Point::new(point.x - viewport.width / 2.0, point.y - viewport.height / 2.0);
        Some(Self::unproject(origin.add(&offset), pose.zoom))
    }

    fn current_camera_pose(&self) -> CameraPose {
        self.pose
    }
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected}, got {actual}"
    );
}

/// Like [`assert_close`], but 180 and -180 count as the same longitude
pub fn assert_longitude_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    let difference = (actual - expected + 180.0).rem_euclid(360.0) - 180.0;
    assert!(
        difference.abs() <= tolerance,
        "{what}: expected longitude {expected}, got {actual}"
    );
}
