use std::ops::Range;

use regex::Regex;

use crate::error::Result;

/// Textual matcher for `selector { ... }`.
///
/// This is not a CSS parser. The body is `[^}]+`, so the match ends at the
/// first closing brace after the opening one: a body with nested braces is
/// cut short, and an empty body (`body {}`) never matches. The selector is
/// not anchored either, so `body` also matches inside `tbody { ... }`.
#[derive(Debug, Clone)]
pub struct RuleBlockPattern {
    selector: String,
    regex: Regex,
}

impl RuleBlockPattern {
    pub fn new(selector: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"{}\s*\{{[^}}]+\}}", regex::escape(selector)))?;
        Ok(RuleBlockPattern {
            selector: selector.to_string(),
            regex,
        })
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Byte range of the first rule block, if any.
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    /// True if the whole of `text` is exactly one block for this selector.
    pub fn matches_whole(&self, text: &str) -> bool {
        self.find(text) == Some(0..text.len())
    }
}
