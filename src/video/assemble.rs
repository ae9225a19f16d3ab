use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::common::paths;
use crate::ui::prelude::{Level, emit};

use super::audio::LoudnessTarget;
use super::cli::AssembleArgs;
use super::config::AssemblerConfig;
use super::pipeline::{InterviewPipeline, InterviewRequest};
use super::support::runner::SystemToolRunner;
use super::support::utils::{canonicalize_existing, ensure_supported_extension, with_mp4_suffix};

pub fn handle_assemble(args: AssembleArgs) -> Result<()> {
    // nothing is written before the toolchain is known to be usable
    let config = AssemblerConfig::read()?;
    let request = build_request(args, &config)?;

    let runner = SystemToolRunner::new().with_progress(true);
    let pipeline = InterviewPipeline::new(&runner, &config);
    pipeline.ensure_toolchain()?;
    AssemblerConfig::write_default_if_missing(paths::intercut_config_path()?)?;

    let output = pipeline.process_interview(&request)?;

    emit(
        Level::Info,
        "video.assemble.output",
        &output.display().to_string(),
        Some(serde_json::json!({ "output": output })),
    );
    Ok(())
}

/// Validate CLI input and fill unset options from `config`.
pub fn build_request(args: AssembleArgs, config: &AssemblerConfig) -> Result<InterviewRequest> {
    let intro = validated_input(&args.intro, "intro")?;
    let main = validated_input(&args.main, "main")?;
    let outro = validated_input(&args.outro, "outro")?;

    let caption = args.caption.trim();
    if caption.is_empty() {
        bail!("Caption text must not be empty");
    }

    let font_file = match args.font_file {
        Some(font) => Some(canonicalize_existing(&font).context("Caption font file")?),
        None => None,
    };

    let font_size = args.font_size.unwrap_or(config.font_size);
    if font_size == 0 {
        bail!("Font size must be positive");
    }

    let defaults = config.loudness();
    let loudness = LoudnessTarget {
        integrated: args.lufs.unwrap_or(defaults.integrated),
        true_peak: args.true_peak.unwrap_or(defaults.true_peak),
    };

    let mut request = InterviewRequest::new(
        intro,
        main,
        outro,
        caption,
        with_mp4_suffix(&args.out),
        config,
    );
    request.caption_duration = args.caption_duration.unwrap_or(config.caption_duration);
    request.font_file = font_file;
    request.font_size = font_size;
    request.denoise = args.denoise || config.denoise;
    request.loudness = loudness;
    Ok(request)
}

fn validated_input(path: &std::path::Path, role: &str) -> Result<PathBuf> {
    let path = canonicalize_existing(path).with_context(|| format!("{role} clip"))?;
    ensure_supported_extension(&path)?;
    Ok(path)
}
