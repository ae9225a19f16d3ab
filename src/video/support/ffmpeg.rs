use std::path::Path;

/// Output encoding settings shared by segment normalization and the
/// re-encoding concat fallback.
#[derive(Debug, Clone, Copy)]
pub struct EncodeProfile {
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub crf: u8,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
    pub sample_rate: u32,
    pub faststart: bool,
}

impl EncodeProfile {
    pub fn push_to(&self, args: &mut Vec<String>) {
        args.extend([
            "-c:v".to_string(),
            self.video_codec.to_string(),
            "-preset".to_string(),
            self.preset.to_string(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-c:a".to_string(),
            self.audio_codec.to_string(),
            "-b:a".to_string(),
            self.audio_bitrate.to_string(),
            "-ar".to_string(),
            self.sample_rate.to_string(),
        ]);
        if self.faststart {
            args.push("-movflags".to_string());
            args.push("+faststart".to_string());
        }
    }
}

pub const PROFILE_H264_AAC_QUALITY: EncodeProfile = EncodeProfile {
    video_codec: "libx264",
    preset: "medium",
    crf: 18,
    audio_codec: "aac",
    audio_bitrate: "192k",
    sample_rate: 48_000,
    faststart: false,
};

pub const PROFILE_H264_AAC_QUALITY_FASTSTART: EncodeProfile = EncodeProfile {
    faststart: true,
    ..PROFILE_H264_AAC_QUALITY
};

/// Quote a path as a filter option value, quotes included.
///
/// The filtergraph parser strips one level of quoting before the filter's
/// option parser unescapes a second, so the path is escaped for the option
/// parser first and then single-quoted for the graph parser.
pub fn quote_filter_path(path: &Path) -> String {
    let option_level = path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:");
    format!("'{}'", option_level.replace('\'', "'\\''"))
}

/// Plain decimal rendering for filter and CLI numbers (`25`, `29.97`, `-0.1`).
pub fn format_number(value: f64) -> String {
    format!("{value}")
}
