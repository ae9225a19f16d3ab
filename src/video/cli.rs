use clap::{Args, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum VideoCommands {
    /// Normalize intro, main and outro clips and join them into one video
    Assemble(AssembleArgs),
    /// Show the streams of a media file and the audio track that would be used
    Probe(ProbeArgs),
    /// Verify that ffmpeg and ffprobe are installed
    Check,
    /// Inspect the intercut configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the location of the config file
    Path,
    /// Print the effective configuration, including environment overrides
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct AssembleArgs {
    /// Opening clip
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub intro: PathBuf,

    /// Interview clip; its resolution and frame rate define the output format
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub main: PathBuf,

    /// Closing clip
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub outro: PathBuf,

    /// Lower-third text burned into the interview clip
    #[arg(short = 'c', long)]
    pub caption: String,

    /// Seconds the caption stays visible (default from config, 10)
    #[arg(long)]
    pub caption_duration: Option<f64>,

    /// Font file for the caption (default from config or DEFAULT_FONT_PATH)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub font_file: Option<PathBuf>,

    /// Caption font size in pixels (default from config, 56)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Apply FFT denoising to the interview audio
    #[arg(long)]
    pub denoise: bool,

    /// Integrated loudness target in LUFS (default from config, -16)
    #[arg(long, allow_hyphen_values = true)]
    pub lufs: Option<f64>,

    /// True-peak limit in dBTP (default from config, -0.1)
    #[arg(long, allow_hyphen_values = true)]
    pub true_peak: Option<f64>,

    /// Output file; `.mp4` is appended when missing
    #[arg(
        short = 'o',
        long = "out",
        value_hint = ValueHint::FilePath,
        default_value = "interview_final.mp4"
    )]
    pub out: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Media file to inspect
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}
