use std::path::PathBuf;

use thiserror::Error;

use super::support::runner::ToolFailure;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Required media tools not found on PATH: {}", .missing.join(", "))]
    ToolchainUnavailable { missing: Vec<String> },

    #[error("Failed to probe {}: {reason}", .path.display())]
    Probe { path: PathBuf, reason: String },

    #[error("No video stream found in {}", .path.display())]
    NoVideoStream { path: PathBuf },

    #[error(
        "Unsupported extension '{extension}' for {}; expected mp4, mkv or mov",
        .path.display()
    )]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("{stage} failed (exit status {code:?}):\n{output}")]
    Encode {
        stage: String,
        code: Option<i32>,
        output: String,
    },

    #[error("I/O error while {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl AssembleError {
    pub fn io(action: impl Into<String>, source: std::io::Error) -> Self {
        AssembleError::Io {
            action: action.into(),
            source,
        }
    }

    /// Convert a failed encoder invocation into an `Encode` error for `stage`.
    pub fn encode(stage: impl Into<String>, failure: ToolFailure) -> Self {
        let stage = stage.into();
        match failure {
            ToolFailure::Spawn { program, source } => AssembleError::Encode {
                stage,
                code: None,
                output: format!("failed to start {program}: {source}"),
            },
            ToolFailure::Exit { code, output, .. } => AssembleError::Encode {
                stage,
                code,
                output,
            },
        }
    }
}

pub type AssembleResult<T> = Result<T, AssembleError>;
