use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (dp), y growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from a center point and size
    pub fn from_center_and_size(center: Point, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    /// Square of half-width `radius` around `center`
    pub fn around(center: Point, radius: f64) -> Self {
        Self::from_center_and_size(center, radius * 2.0, radius * 2.0)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Checks if the rectangle contains a point (edges included)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Checks if two rectangles overlap. Rectangles that only share an edge or a
    /// corner do not intersect.
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Returns a new rectangle grown by `amount` on every side
    pub fn expanded(&self, amount: f64) -> ScreenRect {
        ScreenRect::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Min and max corners, in the layout `rstar` envelopes expect
    pub fn corners(&self) -> ([f64; 2], [f64; 2]) {
        (
            [self.left.min(self.right), self.top.min(self.bottom)],
            [self.left.max(self.right), self.top.max(self.bottom)],
        )
    }
}

impl Default for ScreenRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let rect = ScreenRect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 20.0);
        assert_eq!(rect.center(), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = ScreenRect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(&Point::new(15.0, 25.0)));
        assert!(rect.contains(&Point::new(10.0, 40.0)));
        assert!(!rect.contains(&Point::new(5.0, 25.0)));
    }

    #[test]
    fn test_rect_intersection() {
        let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
        let b = ScreenRect::new(5.0, 5.0, 15.0, 15.0);
        let c = ScreenRect::new(20.0, 20.0, 25.0, 25.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
        let right = ScreenRect::new(10.0, 0.0, 20.0, 10.0);
        let below = ScreenRect::new(0.0, 10.0, 10.0, 20.0);
        let corner = ScreenRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn test_around_and_expanded() {
        let rect = ScreenRect::around(Point::new(50.0, 50.0), 35.0);
        assert_eq!(rect, ScreenRect::new(15.0, 15.0, 85.0, 85.0));
        assert_eq!(rect.expanded(5.0), ScreenRect::new(10.0, 10.0, 90.0, 90.0));
        assert!(ScreenRect::default().is_empty());
    }
}
