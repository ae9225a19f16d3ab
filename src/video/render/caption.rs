use std::path::PathBuf;

use crate::video::support::ffmpeg::{format_number, quote_filter_path};

/// Lower-third placement and box styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionStyle {
    pub margin_x: u32,
    pub margin_y: u32,
    pub box_opacity: f64,
    pub border_width: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            margin_x: 60,
            margin_y: 80,
            box_opacity: 0.55,
            border_width: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSpec {
    pub text: String,
    pub duration: f64,
    pub font_file: Option<PathBuf>,
    pub font_size: u32,
    pub style: CaptionStyle,
}

impl CaptionSpec {
    pub const DEFAULT_FONT_SIZE: u32 = 56;
    pub const DEFAULT_DURATION: f64 = 10.0;

    pub fn new(text: impl Into<String>, duration: f64) -> Self {
        Self {
            text: text.into(),
            duration,
            font_file: None,
            font_size: Self::DEFAULT_FONT_SIZE,
            style: CaptionStyle::default(),
        }
    }

    pub fn with_font_file(mut self, font_file: Option<PathBuf>) -> Self {
        self.font_file = font_file;
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Only captions with text and a positive duration are drawn.
    pub fn is_renderable(&self) -> bool {
        !self.text.is_empty() && self.duration > 0.0
    }
}

/// Escape caption text for a single-quoted `drawtext` value.
///
/// Backslashes must be handled first; the later replacements introduce
/// backslashes of their own that must survive untouched.
pub fn escape_drawtext_text(text: &str) -> String {
    text.replace('\\', "\\\\\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
        .replace(',', "\\,")
}

pub fn build_caption_filter(spec: &CaptionSpec) -> String {
    let style = &spec.style;
    let mut parts = vec![
        format!("drawtext=text='{}'", escape_drawtext_text(&spec.text)),
        format!("x={}", style.margin_x),
        format!("y=h-th-{}", style.margin_y),
        "fontcolor=white".to_string(),
        format!("fontsize={}", spec.font_size),
        "box=1".to_string(),
        format!("boxcolor=black@{}", format_number(style.box_opacity)),
        format!("boxborderw={}", style.border_width),
        "alpha=1".to_string(),
        format!("enable='lte(t,{})'", format_number(spec.duration)),
    ];

    if let Some(font) = spec.font_file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        parts.push(format!("fontfile={}", quote_filter_path(font)));
    }

    parts.join(":")
}
