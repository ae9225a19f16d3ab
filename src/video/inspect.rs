use anyhow::Result;
use serde_json::json;

use crate::ui::prelude::{Level, emit};

use super::audio::{audio_score, select_primary_audio};
use super::cli::ProbeArgs;
use super::config::AssemblerConfig;
use super::support::probe::{CodecType, StreamDescriptor, probe_streams, video_geometry};
use super::support::runner::SystemToolRunner;
use super::support::utils::canonicalize_existing;

pub fn handle_probe(args: ProbeArgs) -> Result<()> {
    let config = AssemblerConfig::load()?;
    let path = canonicalize_existing(&args.file)?;
    let runner = SystemToolRunner::new();

    let streams = probe_streams(&runner, &config.ffprobe_program, &path)?;
    let selected = select_primary_audio(&streams);

    for stream in &streams {
        emit(
            Level::Info,
            "video.probe.stream",
            &describe_stream(stream, selected),
            Some(json!({
                "index": stream.index,
                "codec_type": codec_label(stream.codec_type),
                "codec": stream.codec_name,
                "width": stream.width,
                "height": stream.height,
                "language": stream.language,
                "channels": stream.channels,
                "default": stream.is_default,
            })),
        );
    }

    match video_geometry(&path, &streams) {
        Ok(geometry) => emit(
            Level::Success,
            "video.probe.geometry",
            &format!(
                "Normalized format: {}x{} @ {} fps",
                geometry.width, geometry.height, geometry.fps
            ),
            Some(json!({
                "width": geometry.width,
                "height": geometry.height,
                "fps": geometry.fps,
            })),
        ),
        Err(err) => emit(Level::Warn, "video.probe.geometry", &err.to_string(), None),
    }

    let message = match selected {
        Some(index) => format!("Selected audio stream: {index}"),
        None => "No audio streams; the first audio track would be mapped if present".to_string(),
    };
    emit(
        Level::Info,
        "video.probe.audio",
        &message,
        Some(json!({ "selected_audio": selected })),
    );

    Ok(())
}

fn codec_label(codec_type: CodecType) -> &'static str {
    match codec_type {
        CodecType::Video => "video",
        CodecType::Audio => "audio",
        CodecType::Other => "other",
    }
}

fn describe_stream(stream: &StreamDescriptor, selected: Option<u32>) -> String {
    let codec = stream.codec_name.as_deref().unwrap_or("unknown");
    match stream.codec_type {
        CodecType::Video => format!(
            "#{} video {codec} {}x{}",
            stream.index,
            stream.width.unwrap_or(0),
            stream.height.unwrap_or(0)
        ),
        CodecType::Audio => format!(
            "#{} audio {codec} lang={} ch={}{} score={}{}",
            stream.index,
            stream.language.as_deref().unwrap_or("-"),
            stream.channels,
            if stream.is_default { " default" } else { "" },
            audio_score(stream),
            if selected == Some(stream.index) { "  <- selected" } else { "" }
        ),
        CodecType::Other => format!("#{} other {codec}", stream.index),
    }
}
