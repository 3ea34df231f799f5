use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while patching a stylesheet.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read stylesheet {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write stylesheet {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("selector does not produce a usable pattern")]
    Pattern(#[from] regex::Error),

    #[error("invalid replacement block: {reason}")]
    InvalidReplacement { reason: String },

    /// Only raised in strict mode; the default treats a missing block as a no-op.
    #[error("no `{selector}` rule block found in {}", path.display())]
    NoMatch { selector: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, PatchError>;
