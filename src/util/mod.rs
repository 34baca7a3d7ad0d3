//! Utility modules: string distance.

pub mod distance;

pub use distance::{closest_match, levenshtein};
