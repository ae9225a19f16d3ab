use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Run the compiled `intercut` binary with an isolated config home.
pub fn run_intercut_command(
    env: &TestEnvironment,
    args: &[&str],
    path_override: Option<&Path>,
) -> Result<CommandOutput> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_intercut"));
    cmd.args(args)
        .env("XDG_CONFIG_HOME", env.config_home())
        .env("HOME", env.path())
        .env_remove("DEFAULT_FONT_PATH");
    if let Some(path) = path_override {
        cmd.env("PATH", path);
    }

    let output = cmd.output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

fn tool_lists(tool: &str, flag: &str, needle: &str) -> bool {
    Command::new(tool)
        .args(["-hide_banner", flag])
        .output()
        .map(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).contains(needle))
        .unwrap_or(false)
}

/// ffmpeg with libx264 and drawtext, plus ffprobe, are on PATH.
pub fn media_toolchain_available() -> bool {
    which::which("ffmpeg").is_ok()
        && which::which("ffprobe").is_ok()
        && tool_lists("ffmpeg", "-encoders", "libx264")
        && tool_lists("ffmpeg", "-filters", "drawtext")
}

/// A TrueType font drawtext can load, if the machine has one.
pub fn find_caption_font() -> Option<PathBuf> {
    let dejavu = PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
    if dejavu.is_file() {
        return Some(dejavu);
    }
    let output = Command::new("fc-match")
        .args(["--format=%{file}", "sans"])
        .output()
        .ok()?;
    let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    path.is_file().then_some(path)
}

/// Synthetic test pattern with a sine tone.
pub fn make_clip(path: &Path, width: u32, height: u32, seconds: u32) -> Result<()> {
    let video = format!("testsrc=size={width}x{height}:rate=25:duration={seconds}");
    let audio = format!("sine=frequency=440:sample_rate=48000:duration={seconds}");
    let output = Command::new("ffmpeg")
        .args(["-y", "-hide_banner", "-loglevel", "error"])
        .args(["-f", "lavfi", "-i", &video, "-f", "lavfi", "-i", &audio])
        .args(["-shortest", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a", "aac"])
        .arg(path)
        .output()?;
    if !output.status.success() {
        bail!(
            "failed to generate {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(path)
        .output()?;
    let text = String::from_utf8(output.stdout)?;
    let (w, h) = text
        .trim()
        .split_once('x')
        .ok_or_else(|| anyhow::anyhow!("unexpected ffprobe output '{}'", text.trim()))?;
    Ok((w.parse()?, h.parse()?))
}

fn probe_video_entry(path: &Path, entry: &str) -> Result<String> {
    let output = Command::new("ffprobe")
        .args(["-v", "error", "-select_streams", "v:0", "-show_entries"])
        .arg(format!("stream={entry}"))
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(path)
        .output()?;
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Duration of the first video stream in seconds.
pub fn probe_video_duration_seconds(path: &Path) -> Result<f64> {
    Ok(probe_video_entry(path, "duration")?.parse()?)
}

/// `r_frame_rate` of the first video stream, e.g. `25/1`.
pub fn probe_frame_rate(path: &Path) -> Result<String> {
    probe_video_entry(path, "r_frame_rate")
}

pub fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, b"")?)
}
