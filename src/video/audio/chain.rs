use serde::{Deserialize, Serialize};

use crate::video::render::FilterChain;
use crate::video::support::ffmpeg::format_number;

const HIGHPASS_HZ: u32 = 80;
const LOWPASS_HZ: u32 = 16_000;
const DENOISE_FILTER: &str = "afftdn=nr=20";
const COMPRESSOR_FILTER: &str = "acompressor=threshold=-18dB:ratio=3:attack=5:release=80:makeup=6";
const LOUDNESS_RANGE_LU: u32 = 11;

/// EBU R128 targets applied by `loudnorm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessTarget {
    /// Integrated loudness in LUFS
    pub integrated: f64,
    /// True-peak ceiling in dBTP
    pub true_peak: f64,
}

impl LoudnessTarget {
    pub const DEFAULT_INTEGRATED: f64 = -16.0;
    pub const DEFAULT_TRUE_PEAK: f64 = -0.1;
}

impl Default for LoudnessTarget {
    fn default() -> Self {
        Self {
            integrated: Self::DEFAULT_INTEGRATED,
            true_peak: Self::DEFAULT_TRUE_PEAK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioChain {
    pub denoise: bool,
    pub compressor: bool,
    pub loudness: LoudnessTarget,
}

impl AudioChain {
    pub fn new(loudness: LoudnessTarget) -> Self {
        Self {
            denoise: false,
            compressor: true,
            loudness,
        }
    }

    pub fn with_denoise(mut self, denoise: bool) -> Self {
        self.denoise = denoise;
        self
    }

    pub fn with_compressor(mut self, compressor: bool) -> Self {
        self.compressor = compressor;
        self
    }

    /// Band-limit, optionally denoise and compress, then loudness-normalize.
    pub fn build(&self) -> String {
        let mut chain = FilterChain::new();
        chain.push(format!("highpass=f={HIGHPASS_HZ}"));
        chain.push(format!("lowpass=f={LOWPASS_HZ}"));
        if self.denoise {
            chain.push(DENOISE_FILTER.to_string());
        }
        if self.compressor {
            chain.push(COMPRESSOR_FILTER.to_string());
        }
        chain.push(format!(
            "loudnorm=I={}:TP={}:LRA={LOUDNESS_RANGE_LU}",
            format_number(self.loudness.integrated),
            format_number(self.loudness.true_peak),
        ));
        chain.join()
    }
}
