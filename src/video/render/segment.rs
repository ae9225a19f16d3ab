use std::path::PathBuf;

use super::FilterChain;
use super::caption::{CaptionSpec, build_caption_filter};
use crate::video::audio::{AudioChain, LoudnessTarget};
use crate::video::error::{AssembleError, AssembleResult};
use crate::video::support::ffmpeg::{PROFILE_H264_AAC_QUALITY, format_number};
use crate::video::support::probe::VideoGeometry;
use crate::video::support::runner::{ToolRunner, run_checked};

/// Everything needed to normalize one input into a uniform segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentJob {
    pub label: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub geometry: VideoGeometry,
    pub audio_index: Option<u32>,
    pub caption: Option<CaptionSpec>,
    pub denoise: bool,
    pub compressor: bool,
    pub loudness: LoudnessTarget,
}

impl SegmentJob {
    pub fn new(
        label: impl Into<String>,
        input: PathBuf,
        output: PathBuf,
        geometry: VideoGeometry,
        loudness: LoudnessTarget,
    ) -> Self {
        Self {
            label: label.into(),
            input,
            output,
            geometry,
            audio_index: None,
            caption: None,
            denoise: false,
            compressor: true,
            loudness,
        }
    }

    /// Scale into the target box without distortion, centre-pad to the exact
    /// size, draw the caption and force yuv420p.
    pub fn video_filter(&self) -> String {
        let VideoGeometry { width, height, .. } = self.geometry;
        let mut chain = FilterChain::new();
        chain.push(format!(
            "scale={width}:{height}:force_original_aspect_ratio=decrease"
        ));
        chain.push(format!("pad={width}:{height}:(ow-iw)/2:(oh-ih)/2"));
        if let Some(caption) = self.caption.as_ref().filter(|c| c.is_renderable()) {
            chain.push(build_caption_filter(caption));
        }
        chain.push("format=yuv420p".to_string());
        chain.join()
    }

    pub fn audio_filter(&self) -> String {
        AudioChain::new(self.loudness)
            .with_denoise(self.denoise)
            .with_compressor(self.compressor)
            .build()
    }

    pub fn map_args(&self) -> Vec<String> {
        let audio = match self.audio_index {
            Some(index) => format!("0:{index}"),
            // optional mapping keeps silent clips working
            None => "0:a:0?".to_string(),
        };
        vec![
            "-map".to_string(),
            "0:v:0".to_string(),
            "-map".to_string(),
            audio,
        ]
    }

    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            self.input.to_string_lossy().into_owned(),
            "-r".to_string(),
            format_number(self.geometry.fps),
            "-filter:v".to_string(),
            self.video_filter(),
        ];
        args.extend(self.map_args());
        PROFILE_H264_AAC_QUALITY.push_to(&mut args);
        args.push("-filter:a".to_string());
        args.push(self.audio_filter());
        args.push(self.output.to_string_lossy().into_owned());
        args
    }
}

pub fn normalize_segment<R: ToolRunner + ?Sized>(
    runner: &R,
    ffmpeg: &str,
    job: &SegmentJob,
) -> AssembleResult<()> {
    run_checked(runner, ffmpeg, &job.ffmpeg_args()).map_err(|failure| {
        AssembleError::encode(format!("Normalizing {} segment", job.label), failure)
    })?;
    Ok(())
}
