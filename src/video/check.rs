use anyhow::Result;
use serde_json::json;

use crate::ui::prelude::{Level, emit};

use super::config::AssemblerConfig;
use super::error::AssembleError;
use super::support::runner::{SystemToolRunner, ToolRunner};

pub fn handle_check() -> Result<()> {
    let config = AssemblerConfig::load()?;
    check_toolchain(&SystemToolRunner::new(), &config)?;
    Ok(())
}

/// Report where each required program resolves to.
pub fn check_toolchain<R: ToolRunner + ?Sized>(
    runner: &R,
    config: &AssemblerConfig,
) -> Result<(), AssembleError> {
    let mut missing = Vec::new();

    for program in [&config.ffprobe_program, &config.ffmpeg_program] {
        if runner.is_available(program) {
            let location = runner
                .locate(program)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| program.clone());
            emit(
                Level::Success,
                "video.check.tool",
                &format!("{program}: {location}"),
                Some(json!({ "program": program, "path": location })),
            );
        } else {
            emit(
                Level::Error,
                "video.check.tool",
                &format!("{program}: not found on PATH"),
                Some(json!({ "program": program, "path": null })),
            );
            missing.push(program.clone());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AssembleError::ToolchainUnavailable { missing })
    }
}
