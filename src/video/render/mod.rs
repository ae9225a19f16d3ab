//! ffmpeg filter construction and invocation for segments and the final join.

pub mod caption;
pub mod concat;
pub(crate) mod logging;
pub mod segment;

pub use caption::CaptionSpec;
pub use concat::{ConcatMode, concat_segments, write_manifest};
pub use segment::{SegmentJob, normalize_segment};

/// Comma-separated ffmpeg filter chain (`-filter:v` / `-filter:a` value).
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<String>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: String) {
        self.filters.push(filter);
    }

    pub fn join(&self) -> String {
        self.filters.join(",")
    }
}
