pub mod icon;
pub mod interpolation;

// Re-export commonly used types and functions for convenience
pub use icon::{IconAnimation, IconAnimator, IconDirection};
pub use interpolation::{frame_count, frame_progress, frame_progressions, Interpolator};
