use std::io;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::ui::prelude::{Level, OutputFormat, emit, get_output_format};

/// Captured result of one external tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Everything the tool printed, stderr first since that is where ffmpeg
    /// reports its diagnostics.
    pub fn combined(&self) -> String {
        match (self.stderr.trim().is_empty(), self.stdout.trim().is_empty()) {
            (true, _) => self.stdout.clone(),
            (false, true) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stderr.trim_end(), self.stdout),
        }
    }
}

#[derive(Error, Debug)]
pub enum ToolFailure {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {code:?}: {}", .output.trim())]
    Exit {
        program: String,
        code: Option<i32>,
        output: String,
    },
}

/// Runs external programs from an argument list and waits for them to exit.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput>;

    /// Whether `program` resolves to an executable.
    fn is_available(&self, program: &str) -> bool;

    fn locate(&self, program: &str) -> Option<PathBuf> {
        let _ = program;
        None
    }
}

/// Run `program` and turn a spawn error or non-zero exit into a `ToolFailure`.
pub fn run_checked<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    args: &[String],
) -> Result<ToolOutput, ToolFailure> {
    emit(
        Level::Debug,
        "video.tool.command",
        &format!("$ {}", render_command_line(program, args)),
        None,
    );

    let output = runner
        .run(program, args)
        .map_err(|source| ToolFailure::Spawn {
            program: program.to_string(),
            source,
        })?;

    emit(
        Level::Debug,
        "video.tool.exit",
        &format!(
            "{program} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            output.code,
            output.stdout.len(),
            output.stderr.len()
        ),
        None,
    );

    if !output.success() {
        return Err(ToolFailure::Exit {
            program: program.to_string(),
            code: output.code,
            output: output.combined(),
        });
    }

    Ok(output)
}

pub fn render_command_line(program: &str, args: &[String]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(program);
    words.extend(args.iter().map(String::as_str));
    shell_words::join(words)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolRunner {
    show_progress: bool,
}

impl SystemToolRunner {
    pub fn new() -> Self {
        Self {
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while a tool runs. Ignored in JSON mode.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn spinner(&self, program: &str) -> Option<ProgressBar> {
        if !self.show_progress || get_output_format() == OutputFormat::Json {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("running {program}"));
        Some(pb)
    }
}

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        let pb = self.spinner(program);

        let result = duct::cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run();

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let output = result?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
