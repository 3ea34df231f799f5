//! Rewrites the first `selector { ... }` rule block of a stylesheet with a
//! fixed replacement block.

pub mod config;
pub mod error;
pub mod patch;

pub mod style {
    pub mod owned_css;
    pub mod replacement;
    pub mod rule_block;
}

pub mod text {
    pub mod line_endings;
}

pub use config::PatchConfig;
pub use error::PatchError;
pub use patch::{patch, patch_file, patch_str, render, PatchOutcome, PatchReport};
pub use style::replacement::Replacement;
pub use text::line_endings::LineEnding;
