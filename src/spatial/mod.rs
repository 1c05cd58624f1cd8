pub mod index;
pub mod overlap;

pub use index::{IndexedRect, RectIndex};
pub use overlap::{resolve_visible_labels, LabelCandidate};
