use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::prelude::Level;

use super::audio::{LoudnessTarget, select_primary_audio};
use super::config::AssemblerConfig;
use super::error::{AssembleError, AssembleResult};
use super::render::logging::log_event;
use super::render::{
    CaptionSpec, ConcatMode, SegmentJob, concat_segments, normalize_segment, write_manifest,
};
use super::support::probe::{StreamDescriptor, VideoGeometry, probe_streams, video_geometry};
use super::support::runner::ToolRunner;

const MANIFEST_NAME: &str = "files.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    Intro,
    Main,
    Outro,
}

impl SegmentRole {
    pub const ALL: [SegmentRole; 3] = [SegmentRole::Intro, SegmentRole::Main, SegmentRole::Outro];

    pub fn label(self) -> &'static str {
        match self {
            SegmentRole::Intro => "intro",
            SegmentRole::Main => "main",
            SegmentRole::Outro => "outro",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            SegmentRole::Intro => "00_intro.mp4",
            SegmentRole::Main => "01_main.mp4",
            SegmentRole::Outro => "02_outro.mp4",
        }
    }
}

/// One assembly job as handed over by the front end. Paths are expected to
/// exist and carry an allowed extension.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewRequest {
    pub intro: PathBuf,
    pub main: PathBuf,
    pub outro: PathBuf,
    pub caption_text: String,
    pub caption_duration: f64,
    pub font_file: Option<PathBuf>,
    pub font_size: u32,
    pub denoise: bool,
    pub loudness: LoudnessTarget,
    pub output: PathBuf,
}

impl InterviewRequest {
    /// Request with every optional setting taken from `config`.
    pub fn new(
        intro: PathBuf,
        main: PathBuf,
        outro: PathBuf,
        caption_text: impl Into<String>,
        output: PathBuf,
        config: &AssemblerConfig,
    ) -> Self {
        Self {
            intro,
            main,
            outro,
            caption_text: caption_text.into(),
            caption_duration: config.caption_duration,
            font_file: None,
            font_size: config.font_size,
            denoise: config.denoise,
            loudness: config.loudness(),
            output,
        }
    }

    pub fn input(&self, role: SegmentRole) -> &Path {
        match role {
            SegmentRole::Intro => &self.intro,
            SegmentRole::Main => &self.main,
            SegmentRole::Outro => &self.outro,
        }
    }
}

pub struct InterviewPipeline<'a, R: ToolRunner + ?Sized> {
    runner: &'a R,
    config: &'a AssemblerConfig,
}

impl<'a, R: ToolRunner + ?Sized> InterviewPipeline<'a, R> {
    pub fn new(runner: &'a R, config: &'a AssemblerConfig) -> Self {
        Self { runner, config }
    }

    /// Fails with `ToolchainUnavailable` listing every missing program.
    pub fn ensure_toolchain(&self) -> AssembleResult<()> {
        let missing: Vec<String> = [&self.config.ffprobe_program, &self.config.ffmpeg_program]
            .into_iter()
            .filter(|program| !self.runner.is_available(program))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssembleError::ToolchainUnavailable { missing })
        }
    }

    /// Normalize intro, main and outro to `main`'s geometry and join them into
    /// `request.output`.
    pub fn process_interview(&self, request: &InterviewRequest) -> AssembleResult<PathBuf> {
        self.ensure_toolchain()?;

        let ffprobe = self.config.ffprobe_program.as_str();
        let ffmpeg = self.config.ffmpeg_program.as_str();

        let main_streams = probe_streams(self.runner, ffprobe, &request.main)?;
        let geometry = video_geometry(&request.main, &main_streams)?;
        log_event(
            Level::Info,
            "video.assemble.geometry",
            format!(
                "Target format {}x{} @ {} fps (from {})",
                geometry.width,
                geometry.height,
                geometry.fps,
                request.main.display()
            ),
        );

        let font_file = self.resolve_font(request.font_file.as_deref());

        // Dropping the TempDir removes every intermediate file on all exit paths.
        let workdir = tempfile::Builder::new()
            .prefix("intercut-")
            .tempdir()
            .map_err(|err| AssembleError::io("creating working directory", err))?;
        let workdir_path = std::path::absolute(workdir.path())
            .map_err(|err| AssembleError::io("resolving working directory", err))?;

        let mut segments = Vec::with_capacity(SegmentRole::ALL.len());
        for role in SegmentRole::ALL {
            let input = request.input(role);
            let streams = match role {
                SegmentRole::Main => main_streams.clone(),
                _ => probe_streams(self.runner, ffprobe, input)?,
            };

            let output = workdir_path.join(role.file_name());
            let job = self.segment_job(
                role,
                request,
                &streams,
                geometry,
                output.clone(),
                font_file.clone(),
            );

            log_event(
                Level::Info,
                "video.assemble.segment",
                format!(
                    "Normalizing {} ({}){}",
                    role.label(),
                    input.display(),
                    describe_audio(job.audio_index)
                ),
            );
            normalize_segment(self.runner, ffmpeg, &job)?;
            segments.push(output);
        }

        let manifest = workdir_path.join(MANIFEST_NAME);
        write_manifest(&manifest, &segments)?;

        if let Some(parent) = request.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AssembleError::io(format!("creating output directory {}", parent.display()), err)
            })?;
        }

        let mode = concat_segments(self.runner, ffmpeg, &manifest, &request.output)?;

        if !request.output.exists() {
            return Err(AssembleError::Encode {
                stage: "Concatenating segments".to_string(),
                code: Some(0),
                output: format!(
                    "{ffmpeg} reported success but {} was not written",
                    request.output.display()
                ),
            });
        }

        log_event(
            Level::Success,
            "video.assemble.done",
            format!(
                "Wrote {}{}",
                request.output.display(),
                match mode {
                    ConcatMode::StreamCopy => "",
                    ConcatMode::Reencode => " (re-encoded during concat)",
                }
            ),
        );

        Ok(request.output.clone())
    }

    fn segment_job(
        &self,
        role: SegmentRole,
        request: &InterviewRequest,
        streams: &[StreamDescriptor],
        geometry: VideoGeometry,
        output: PathBuf,
        font_file: Option<PathBuf>,
    ) -> SegmentJob {
        let mut job = SegmentJob::new(
            role.label(),
            request.input(role).to_path_buf(),
            output,
            geometry,
            request.loudness,
        );
        job.audio_index = select_primary_audio(streams);

        // intro and outro are never captioned or denoised
        if role == SegmentRole::Main {
            job.denoise = request.denoise;
            job.caption = Some(
                CaptionSpec::new(request.caption_text.clone(), request.caption_duration)
                    .with_font_size(request.font_size)
                    .with_font_file(font_file),
            );
        }
        job
    }

    /// Explicit font first, then the configured default. A default that is
    /// not on disk is dropped so drawtext uses its built-in font.
    fn resolve_font(&self, requested: Option<&Path>) -> Option<PathBuf> {
        if let Some(font) = requested.filter(|p| !p.as_os_str().is_empty()) {
            return Some(font.to_path_buf());
        }

        let default = &self.config.default_font_path;
        if default.as_os_str().is_empty() {
            return None;
        }
        if default.is_file() {
            return Some(default.clone());
        }

        log_event(
            Level::Warn,
            "video.assemble.font",
            format!(
                "Default font {} not found; using the rasterizer's built-in font",
                default.display()
            ),
        );
        None
    }
}

fn describe_audio(index: Option<u32>) -> String {
    match index {
        Some(index) => format!(" using audio stream {index}"),
        None => " with default audio mapping".to_string(),
    }
}
