pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod units;
pub mod viewport;

pub use bounds::ScreenRect;
pub use camera::{CameraPose, MovementReason, MovementState, ViewportSize, ZoomLimits};
pub use config::{AnimationConfig, EngineConfig, EngineProfile, LabelConfig, SelectionConfig};
pub use self::geo::{GeoCoordinate, Point};
pub use units::{Length, LengthUnit};
pub use viewport::{MapBounds, Padding, ScaleStrategy};
