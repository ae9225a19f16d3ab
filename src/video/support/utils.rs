use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::video::error::AssembleError;

/// Container extensions accepted as inputs (compared case-insensitively).
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "mov"];

pub fn canonicalize_existing(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        anyhow::bail!("{} does not exist", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize path {}", path.display()))
}

pub fn ensure_supported_extension(path: &Path) -> Result<(), AssembleError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if ALLOWED_VIDEO_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        Ok(())
    } else {
        Err(AssembleError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }
}

/// Append `.mp4` unless the name already ends with it (any case).
pub fn with_mp4_suffix(path: &Path) -> PathBuf {
    let has_suffix = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"));
    if has_suffix {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".mp4");
    PathBuf::from(name)
}
