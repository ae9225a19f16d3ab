mod common;
mod ui;
mod video;

use clap::Parser;

use crate::ui::prelude::{Level, OutputFormat, emit};
use crate::video::VideoCommands;

/// intercut: normalize and join interview clips
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode (prints every ffmpeg/ffprobe command)
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: VideoCommands,
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(e) = video::handle_video_command(cli.command) {
        emit(Level::Error, "intercut.error", &format!("Error: {e:#}"), None);
        std::process::exit(1);
    }
}
