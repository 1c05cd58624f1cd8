use crate::core::units::Length;
use crate::{MapError, Result};
use geo::HaversineDistance;
use serde::{Deserialize, Serialize};

/// A geographical coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Creates a new coordinate without range checks
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a new coordinate, rejecting values outside latitude [-90, 90] and
    /// longitude [-180, 180]
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(MapError::InvalidCoordinates(format!(
                "latitude {latitude}, longitude {longitude}"
            )))
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Latitude clamped to [-90, 90] and longitude wrapped into [-180, 180)
    pub fn normalized(&self) -> Self {
        Self::new(
            self.latitude.clamp(-90.0, 90.0),
            wrap_longitude(self.longitude),
        )
    }

    /// Great-circle distance to another coordinate
    pub fn distance_to(&self, other: &GeoCoordinate) -> Length {
        let from: geo_types::Point<f64> = (*self).into();
        let to: geo_types::Point<f64> = (*other).into();
        Length::meters(from.haversine_distance(&to))
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude) {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<GeoCoordinate> for geo_types::Point<f64> {
    fn from(coordinate: GeoCoordinate) -> Self {
        geo_types::Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<geo_types::Point<f64>> for GeoCoordinate {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<GeoCoordinate> for geo_types::Coord<f64> {
    fn from(coordinate: GeoCoordinate) -> Self {
        geo_types::Coord {
            x: coordinate.longitude,
            y: coordinate.latitude,
        }
    }
}

/// A point in screen space, in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
