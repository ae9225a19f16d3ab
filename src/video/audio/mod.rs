//! Audio track selection and the per-segment audio filter chain.

mod chain;
mod select;

pub use chain::{AudioChain, LoudnessTarget};
pub use select::{audio_score, select_primary_audio};
