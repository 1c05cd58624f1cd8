pub mod selection;

pub use selection::{SelectionDisambiguator, TouchCandidate};
