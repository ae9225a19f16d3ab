use anyhow::Result;

use crate::common::paths;
use crate::ui::prelude::{Level, emit};

use super::assemble::handle_assemble;
use super::check::handle_check;
use super::cli::{ConfigCommands, VideoCommands};
use super::config::AssemblerConfig;
use super::inspect::handle_probe;

pub fn handle_video_command(command: VideoCommands) -> Result<()> {
    match command {
        VideoCommands::Assemble(args) => handle_assemble(args),
        VideoCommands::Probe(args) => handle_probe(args),
        VideoCommands::Check => handle_check(),
        VideoCommands::Config { command } => handle_config(command),
    }
}

fn handle_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let path = paths::intercut_config_path()?;
            emit(
                Level::Info,
                "config.path",
                &path.display().to_string(),
                Some(serde_json::json!({ "path": path })),
            );
        }
        ConfigCommands::Show => {
            let config = AssemblerConfig::load()?;
            let rendered = toml::to_string_pretty(&config)?;
            emit(
                Level::Info,
                "config.show",
                rendered.trim_end(),
                Some(serde_json::to_value(&config)?),
            );
        }
    }
    Ok(())
}
