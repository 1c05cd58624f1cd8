use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Supported length units, each a fixed ratio to meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Kilometer,
    Foot,
    Mile,
}

impl LengthUnit {
    /// Number of meters in one of this unit
    pub fn ratio(&self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Kilometer => 1000.0,
            LengthUnit::Foot => 0.3048,
            LengthUnit::Mile => 1609.34,
        }
    }
}

/// A distance stored in meters regardless of the unit it was built from.
///
/// Equality and ordering only ever look at the meter value, so
/// `Length::kilometers(1.0) == Length::meters(1000.0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length {
    meters: f64,
}

impl Length {
    pub const ZERO: Length = Length { meters: 0.0 };

    /// Creates a length from a value expressed in `unit`
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self {
            meters: value * unit.ratio(),
        }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    pub fn kilometers(value: f64) -> Self {
        Self::new(value, LengthUnit::Kilometer)
    }

    pub fn feet(value: f64) -> Self {
        Self::new(value, LengthUnit::Foot)
    }

    pub fn miles(value: f64) -> Self {
        Self::new(value, LengthUnit::Mile)
    }

    /// Value of this length expressed in `unit`
    pub fn to(&self, unit: LengthUnit) -> f64 {
        self.meters / unit.ratio()
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.to(LengthUnit::Kilometer)
    }

    pub fn as_feet(&self) -> f64 {
        self.to(LengthUnit::Foot)
    }

    pub fn as_miles(&self) -> f64 {
        self.to(LengthUnit::Mile)
    }

    pub fn is_finite(&self) -> bool {
        self.meters.is_finite()
    }

    /// Total order over the meter value (NaN sorts last)
    pub fn total_cmp(&self, other: &Length) -> Ordering {
        self.meters.total_cmp(&other.meters)
    }

    pub fn min(self, other: Length) -> Length {
        if other.meters < self.meters {
            other
        } else {
            self
        }
    }

    pub fn max(self, other: Length) -> Length {
        if other.meters > self.meters {
            other
        } else {
            self
        }
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length::meters(self.meters + rhs.meters)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length::meters(self.meters - rhs.meters)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, factor: f64) -> Length {
        Length::meters(self.meters * factor)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, divisor: f64) -> Length {
        Length::meters(self.meters / divisor)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meters.abs() >= 1000.0 {
            write!(f, "{:.3} km", self.as_kilometers())
        } else {
            write!(f, "{:.1} m", self.meters)
        }
    }
}
