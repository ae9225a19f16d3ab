use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::runner::{ToolFailure, ToolRunner, run_checked};
use crate::video::error::{AssembleError, AssembleResult};

pub const DEFAULT_FPS: f64 = 25.0;
const FALLBACK_WIDTH: u32 = 1920;
const FALLBACK_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecType {
    Video,
    Audio,
    Other,
}

impl CodecType {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("video") => CodecType::Video,
            Some("audio") => CodecType::Audio,
            _ => CodecType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    pub numerator: f64,
    pub denominator: f64,
}

impl FrameRate {
    /// Parse an ffprobe rational such as `30000/1001`.
    pub fn parse(value: &str) -> Option<Self> {
        let (num, den) = value.trim().split_once('/')?;
        Some(Self {
            numerator: num.trim().parse().ok()?,
            denominator: den.trim().parse().ok()?,
        })
    }

    pub fn fps(&self) -> Option<f64> {
        if self.denominator == 0.0 {
            return None;
        }
        let fps = self.numerator / self.denominator;
        (fps.is_finite() && fps > 0.0).then_some(fps)
    }
}

/// One stream as reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    pub codec_type: CodecType,
    pub index: u32,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<FrameRate>,
    pub language: Option<String>,
    pub channels: u32,
    pub is_default: bool,
}

impl StreamDescriptor {
    pub fn is_video(&self) -> bool {
        self.codec_type == CodecType::Video
    }

    pub fn is_audio(&self) -> bool {
        self.codec_type == CodecType::Audio
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoGeometry {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

#[derive(Debug, Deserialize)]
struct ProbeDocument {
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    channels: Option<u32>,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    disposition: HashMap<String, i64>,
}

impl From<RawStream> for StreamDescriptor {
    fn from(raw: RawStream) -> Self {
        // Matroska files sometimes report the tag as LANGUAGE.
        let language = raw
            .tags
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("language"))
            .map(|(_, value)| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        StreamDescriptor {
            codec_type: CodecType::parse(raw.codec_type.as_deref()),
            index: raw.index,
            codec_name: raw.codec_name,
            width: raw.width,
            height: raw.height,
            frame_rate: raw.r_frame_rate.as_deref().and_then(FrameRate::parse),
            language,
            channels: raw.channels.unwrap_or(0),
            is_default: raw.disposition.get("default").copied() == Some(1),
        }
    }
}

pub fn parse_probe_output(json: &str) -> Result<Vec<StreamDescriptor>, serde_json::Error> {
    let document: ProbeDocument = serde_json::from_str(json)?;
    Ok(document.streams.into_iter().map(Into::into).collect())
}

pub fn probe_streams<R: ToolRunner + ?Sized>(
    runner: &R,
    ffprobe: &str,
    path: &Path,
) -> AssembleResult<Vec<StreamDescriptor>> {
    let args = vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_streams".to_string(),
        "-of".to_string(),
        "json".to_string(),
        path.to_string_lossy().into_owned(),
    ];

    let output = run_checked(runner, ffprobe, &args).map_err(|failure| {
        let reason = match failure {
            ToolFailure::Spawn { source, .. } => format!("could not run {ffprobe}: {source}"),
            ToolFailure::Exit { code, output, .. } => {
                format!("{ffprobe} exited with status {code:?}: {}", output.trim())
            }
        };
        AssembleError::Probe {
            path: path.to_path_buf(),
            reason,
        }
    })?;

    parse_probe_output(&output.stdout).map_err(|err| AssembleError::Probe {
        path: path.to_path_buf(),
        reason: format!("unparseable stream metadata: {err}"),
    })
}

/// Geometry of the first video stream. A malformed frame rate falls back to
/// 25 fps rather than failing.
pub fn video_geometry(path: &Path, streams: &[StreamDescriptor]) -> AssembleResult<VideoGeometry> {
    let video = streams
        .iter()
        .find(|s| s.is_video())
        .ok_or_else(|| AssembleError::NoVideoStream {
            path: path.to_path_buf(),
        })?;

    let (width, height) = match (video.width, video.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => (FALLBACK_WIDTH, FALLBACK_HEIGHT),
    };
    let fps = video
        .frame_rate
        .and_then(|rate| rate.fps())
        .unwrap_or(DEFAULT_FPS);

    Ok(VideoGeometry { width, height, fps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::support::testing::{FakeRunner, audio_stream, probe_output, video_stream};
    use std::path::PathBuf;

    #[test]
    fn parses_video_and_audio_streams() {
        let json = probe_output(vec![
            video_stream(0, 1920, 1080, "30000/1001"),
            audio_stream(1, Some("ITA"), 6, true),
            audio_stream(2, None, 2, false),
        ]);
        let streams = parse_probe_output(&json).unwrap();

        assert_eq!(streams.len(), 3);
        assert!(streams[0].is_video());
        assert_eq!(streams[0].width, Some(1920));
        assert_eq!(streams[1].language.as_deref(), Some("ita"));
        assert_eq!(streams[1].channels, 6);
        assert!(streams[1].is_default);
        assert_eq!(streams[2].language, None);
        assert!(!streams[2].is_default);
    }

    #[test]
    fn missing_streams_key_is_empty() {
        assert!(parse_probe_output("{}").unwrap().is_empty());
    }

    #[test]
    fn subtitle_and_data_streams_are_other() {
        let json = r#"{"streams":[{"index":3,"codec_type":"subtitle"},{"index":4}]}"#;
        let streams = parse_probe_output(json).unwrap();
        assert!(streams.iter().all(|s| s.codec_type == CodecType::Other));
    }

    #[test]
    fn frame_rate_parsing() {
        assert_eq!(FrameRate::parse("25/1").and_then(|r| r.fps()), Some(25.0));
        assert_eq!(FrameRate::parse("0/0").and_then(|r| r.fps()), None);
        assert_eq!(FrameRate::parse("30/0").and_then(|r| r.fps()), None);
        assert_eq!(FrameRate::parse("abc"), None);
        assert_eq!(FrameRate::parse("x/1"), None);
    }

    #[test]
    fn geometry_uses_first_video_stream() {
        let streams = parse_probe_output(&probe_output(vec![
            audio_stream(0, Some("eng"), 2, true),
            video_stream(1, 1280, 720, "50/1"),
            video_stream(2, 640, 480, "25/1"),
        ]))
        .unwrap();

        let geometry = video_geometry(Path::new("main.mp4"), &streams).unwrap();
        assert_eq!(
            geometry,
            VideoGeometry {
                width: 1280,
                height: 720,
                fps: 50.0
            }
        );
    }

    #[test]
    fn malformed_frame_rate_defaults_to_25() {
        for rate in ["garbage", "24/0", ""] {
            let streams =
                parse_probe_output(&probe_output(vec![video_stream(0, 1920, 1080, rate)])).unwrap();
            let geometry = video_geometry(Path::new("main.mp4"), &streams).unwrap();
            assert_eq!(geometry.fps, DEFAULT_FPS, "rate {rate:?}");
        }
    }

    #[test]
    fn audio_only_input_has_no_video_stream() {
        let streams =
            parse_probe_output(&probe_output(vec![audio_stream(0, None, 2, true)])).unwrap();
        let err = video_geometry(Path::new("podcast.mkv"), &streams).unwrap_err();
        assert!(matches!(
            err,
            AssembleError::NoVideoStream { path } if path == PathBuf::from("podcast.mkv")
        ));
    }

    #[test]
    fn probe_invokes_ffprobe_with_json_output() {
        let runner = FakeRunner::new().respond(|_, _| {
            FakeRunner::success(&probe_output(vec![video_stream(0, 640, 480, "25/1")]))
        });
        let streams = probe_streams(&runner, "ffprobe", Path::new("/in/intro.mov")).unwrap();
        assert_eq!(streams.len(), 1);

        let calls = runner.calls();
        assert_eq!(calls[0].program, "ffprobe");
        assert_eq!(
            calls[0].args,
            ["-v", "error", "-show_streams", "-of", "json", "/in/intro.mov"]
        );
    }

    #[test]
    fn probe_failure_surfaces_tool_output() {
        let runner =
            FakeRunner::new().respond(|_, _| FakeRunner::failure("broken.mp4: Invalid data found"));
        let err = probe_streams(&runner, "ffprobe", Path::new("broken.mp4")).unwrap_err();
        match err {
            AssembleError::Probe { reason, .. } => assert!(reason.contains("Invalid data found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_probe_output_is_a_probe_error() {
        let runner = FakeRunner::new().respond(|_, _| FakeRunner::success("not json"));
        let err = probe_streams(&runner, "ffprobe", Path::new("a.mp4")).unwrap_err();
        assert!(matches!(err, AssembleError::Probe { .. }));
    }
}
