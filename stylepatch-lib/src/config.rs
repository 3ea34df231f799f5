use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::style::replacement::Replacement;
use crate::text::line_endings::LineEnding;

pub const DEFAULT_STYLESHEET: &str = "public/css/style.css";

/// What to patch, with what, and how to write it back.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    pub input: PathBuf,
    /// `None` overwrites the input in place.
    pub output: Option<PathBuf>,
    pub replacement: Replacement,
    /// Fail instead of silently rewriting when no block matches.
    pub strict: bool,
    pub line_ending: LineEnding,
}

impl PatchConfig {
    /// Defaults for everything but the input path.
    pub fn for_path(input: impl Into<PathBuf>) -> Result<Self> {
        Ok(PatchConfig {
            input: input.into(),
            output: None,
            replacement: Replacement::default_body()?,
            strict: false,
            line_ending: LineEnding::default(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        PatchConfig::for_path(DEFAULT_STYLESHEET)
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}
