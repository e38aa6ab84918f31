pub mod filter;
pub mod jitter;
pub mod normalizer;

pub use filter::{CategoryMode, FilterState, apply_filters};
pub use jitter::{jitter, jitter_random};
pub use normalizer::{normalize, normalize_batch, normalize_values};
