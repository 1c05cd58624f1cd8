pub mod marker;

pub use marker::{label_bounds, pin_bounds, Density, MarkerIcon, MarkerSpec, MarkerViewState, Size};
