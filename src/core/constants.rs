//! Engine-wide constants.
//! Keeping them in a single place makes it easier to tweak the magic numbers the
//! viewport math, label resolver and selection helper agree on.

/// Polar circumference of the Earth used by the flat-earth offset math, in meters.
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_007_863.0;

/// Half of [`EARTH_CIRCUMFERENCE_METERS`]; one pole-to-pole meridian.
pub const EARTH_HALF_CIRCUMFERENCE_METERS: f64 = EARTH_CIRCUMFERENCE_METERS / 2.0;

/// Degrees of latitude spanned pole to pole.
pub const EARTH_LATITUDE_DEGREES: f64 = 180.0;

/// Degrees of longitude spanned around the equator.
pub const EARTH_LONGITUDE_DEGREES: f64 = 360.0;

/// Width in dp of the whole world at zoom 0.
pub const BASE_TILE_SIZE_DP: f64 = 256.0;

/// Empirically tuned stretch applied when turning a distance into a longitude delta.
/// Both directions of the padding transform must use this same value.
pub const LONGITUDE_CORRECTION_FACTOR: f64 = 1.35;

/// Lowest zoom a camera pose is clamped to.
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;

/// Highest zoom a camera pose is clamped to.
pub const DEFAULT_MAX_ZOOM: f64 = 21.0;

/// Radius used by `MapBounds::from_center`, in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 7_500.0;

/// Padding applied on every side by `MapBounds::from_center`.
pub const DEFAULT_PADDING_PROPORTION: f64 = 0.05;

/// Fallback radius for non-positive or non-finite radii (1 mm).
pub const MIN_RADIUS_METERS: f64 = 0.001;

/// Fallback for zero or negative viewport dimensions.
pub const MIN_VIEWPORT_DIMENSION_DP: f64 = 1.0;

/// Floor for a visible fraction when it is used as a divisor.
pub const MIN_VISIBLE_FRACTION: f64 = 1e-3;

/// Half-width of the square around a tap that counts as touching a pin.
pub const TOUCH_DISTANCE_THRESHOLD_DP: f64 = 35.0;

/// Share of a touched set that must repeat the previous tap's set to keep cycling.
pub const SET_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Minimum time between two label refreshes triggered by camera moves.
pub const LABEL_REFRESH_THROTTLE_MS: u64 = 100;

/// Playback rate of animated marker icons.
pub const ICON_FRAME_RATE: u32 = 60;

/// Default tension of the anticipate/overshoot interpolator before its 1.5 scale.
pub const DEFAULT_ANTICIPATE_OVERSHOOT_TENSION: f64 = 2.0;
