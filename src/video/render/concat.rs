use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::prelude::Level;
use crate::video::error::{AssembleError, AssembleResult};
use crate::video::render::logging::log_event;
use crate::video::support::ffmpeg::PROFILE_H264_AAC_QUALITY_FASTSTART;
use crate::video::support::runner::{ToolRunner, run_checked};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatMode {
    /// Remux only; requires identical codec parameters across segments.
    StreamCopy,
    /// Full re-encode with `+faststart`.
    Reencode,
}

/// Concat demuxer manifest: one `file '<path>'` line per segment.
pub fn manifest_contents(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|path| {
            let quoted = path.to_string_lossy().replace('\'', "'\\''");
            format!("file '{quoted}'\n")
        })
        .collect()
}

pub fn write_manifest(path: &Path, segments: &[PathBuf]) -> AssembleResult<()> {
    fs::write(path, manifest_contents(segments))
        .map_err(|err| AssembleError::io(format!("writing manifest {}", path.display()), err))
}

pub fn concat_args(manifest: &Path, output: &Path, mode: ConcatMode) -> Vec<String> {
    let mut args: Vec<String> = ["-y", "-f", "concat", "-safe", "0", "-i"]
        .into_iter()
        .map(String::from)
        .collect();
    args.push(manifest.to_string_lossy().into_owned());
    match mode {
        ConcatMode::StreamCopy => {
            args.push("-c".to_string());
            args.push("copy".to_string());
        }
        ConcatMode::Reencode => PROFILE_H264_AAC_QUALITY_FASTSTART.push_to(&mut args),
    }
    args.push(output.to_string_lossy().into_owned());
    args
}

/// Stream-copy the segments into `output`, re-encoding when the copy fails.
///
/// Returns the mode that produced the file. Only a failed re-encode is an
/// error.
pub fn concat_segments<R: ToolRunner + ?Sized>(
    runner: &R,
    ffmpeg: &str,
    manifest: &Path,
    output: &Path,
) -> AssembleResult<ConcatMode> {
    log_event(
        Level::Info,
        "video.concat.copy",
        "Joining segments without re-encoding",
    );
    let copy_args = concat_args(manifest, output, ConcatMode::StreamCopy);
    let failure = match run_checked(runner, ffmpeg, &copy_args) {
        Ok(_) => return Ok(ConcatMode::StreamCopy),
        Err(failure) => failure,
    };

    log_event(
        Level::Warn,
        "video.concat.fallback",
        format!("Stream copy failed, re-encoding instead ({failure})"),
    );

    let reencode_args = concat_args(manifest, output, ConcatMode::Reencode);
    run_checked(runner, ffmpeg, &reencode_args)
        .map_err(|failure| AssembleError::encode("Concatenating segments", failure))?;
    Ok(ConcatMode::Reencode)
}
