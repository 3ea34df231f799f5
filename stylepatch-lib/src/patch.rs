use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::PatchConfig;
use crate::error::{PatchError, Result};
use crate::style::replacement::Replacement;
use crate::text::line_endings::normalize_newlines;

/// Result of patching text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    /// Span of the replaced block in the input; `None` when nothing matched.
    pub matched: Option<Range<usize>>,
}

/// What `patch_file` did on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub output: PathBuf,
    pub matched: Option<Range<usize>>,
    pub bytes_written: usize,
}

impl PatchReport {
    pub fn patched(&self) -> bool {
        self.matched.is_some()
    }
}

/// Replace the first rule block for the replacement's selector. The
/// replacement is spliced in verbatim; text without such a block comes back
/// unchanged.
pub fn patch_str(content: &str, replacement: &Replacement) -> PatchOutcome {
    let pattern = replacement.pattern();
    match pattern.find(content) {
        Some(range) => {
            let mut patched =
                String::with_capacity(content.len() - range.len() + replacement.text().len());
            patched.push_str(&content[..range.start]);
            patched.push_str(replacement.text());
            patched.push_str(&content[range.end..]);
            PatchOutcome {
                content: patched,
                matched: Some(range),
            }
        }
        None => PatchOutcome {
            content: content.to_string(),
            matched: None,
        },
    }
}

/// Produce the exact text `patch_file` would write, without writing it.
pub fn render(config: &PatchConfig) -> Result<String> {
    let outcome = load_and_patch(config)?;
    Ok(config.line_ending.apply(&outcome.content).into_owned())
}

/// Patch the configured stylesheet and write the result.
///
/// The file is written even when nothing matched (unless `strict` is set),
/// so line endings are normalised on every run.
pub fn patch_file(config: &PatchConfig) -> Result<PatchReport> {
    let outcome = load_and_patch(config)?;
    let output = config.output_path();
    let text = config.line_ending.apply(&outcome.content);

    fs::write(output, text.as_bytes()).map_err(|source| PatchError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} bytes to {} ({} line endings)",
        text.len(),
        output.display(),
        config.line_ending
    );

    Ok(PatchReport {
        output: output.to_path_buf(),
        matched: outcome.matched,
        bytes_written: text.len(),
    })
}

/// Patch `path` in place with the built-in `body` block.
pub fn patch(path: impl AsRef<Path>) -> Result<PatchReport> {
    patch_file(&PatchConfig::for_path(path.as_ref())?)
}

fn load_and_patch(config: &PatchConfig) -> Result<PatchOutcome> {
    let raw = fs::read_to_string(&config.input).map_err(|source| PatchError::Read {
        path: config.input.clone(),
        source,
    })?;
    debug!("read {} bytes from {}", raw.len(), config.input.display());

    let selector = config.replacement.selector();
    let outcome = patch_str(&normalize_newlines(&raw), &config.replacement);
    match &outcome.matched {
        Some(range) => debug!(
            "replaced `{}` block at bytes {:?} with\n{}",
            selector,
            range,
            config.replacement.rule()
        ),
        None if config.strict => {
            return Err(PatchError::NoMatch {
                selector: selector.to_string(),
                path: config.input.clone(),
            });
        }
        None => warn!(
            "no `{}` rule block in {}; rewriting unchanged",
            selector,
            config.input.display()
        ),
    }
    Ok(outcome)
}
