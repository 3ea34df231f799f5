use lightningcss::printer::PrinterOptions;
use lightningcss::properties::Property;
use lightningcss::rules::{style::StyleRule, CssRule};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::error::{PatchError, Result};
use crate::style::owned_css::{OwnedDeclaration, OwnedRule};
use crate::style::rule_block::RuleBlockPattern;

pub const DEFAULT_SELECTOR: &str = "body";

/// The block written over the first `body { ... }` rule.
pub const DEFAULT_BODY_BLOCK: &str = "body {
  font-family: 'Segoe UI', 'Microsoft YaHei', -apple-system, BlinkMacSystemFont, sans-serif;
  background-image: linear-gradient(135deg, rgba(224, 195, 252, 0.3) 0%, rgba(142, 197, 252, 0.3) 50%, rgba(184, 240, 245, 0.3) 100%), url('/images/guilin-bg.png');
  background-size: cover;
  background-position: center;
  background-repeat: no-repeat;
  background-attachment: fixed;
  color: var(--text-primary);
  line-height: 1.6;
  min-height: 100vh;
  overflow-x: hidden;
}";

/// A validated replacement block together with the pattern that locates the
/// block it replaces.
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: RuleBlockPattern,
    text: String,
    rule: OwnedRule,
}

impl Replacement {
    /// Checks that `text` is a single rule for `selector` that the rule-block
    /// pattern matches in full, so a second run finds and replaces the same
    /// block again.
    pub fn new(selector: &str, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let pattern = RuleBlockPattern::new(selector)?;

        if !pattern.matches_whole(&text) {
            return Err(invalid(format!(
                "expected a single `{selector} {{ ... }}` block without nested braces"
            )));
        }

        let rule = parse_single_rule(&text)?;
        if squash(&rule.selector_text()) != squash(selector) {
            return Err(invalid(format!(
                "rule selector `{}` does not match `{selector}`",
                rule.selector_text()
            )));
        }

        Ok(Replacement {
            pattern,
            text,
            rule,
        })
    }

    pub fn default_body() -> Result<Self> {
        Replacement::new(DEFAULT_SELECTOR, DEFAULT_BODY_BLOCK)
    }

    pub fn selector(&self) -> &str {
        self.pattern.selector()
    }

    pub fn pattern(&self) -> &RuleBlockPattern {
        &self.pattern
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The replacement as lightningcss understood it.
    pub fn rule(&self) -> &OwnedRule {
        &self.rule
    }

    pub fn declarations(&self) -> &[OwnedDeclaration] {
        &self.rule.declarations
    }
}

fn invalid(reason: String) -> PatchError {
    PatchError::InvalidReplacement { reason }
}

fn squash(selector: &str) -> String {
    selector.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse CSS text and own its one and only style rule.
fn parse_single_rule(css_text: &str) -> Result<OwnedRule> {
    let sheet = StyleSheet::parse(css_text, ParserOptions::default())
        .map_err(|e| invalid(e.kind.to_string()))?;

    let mut rules = sheet.rules.0.iter();
    match (rules.next(), rules.next()) {
        (Some(CssRule::Style(style_rule)), None) => convert_style_rule(style_rule),
        (Some(_), None) => Err(invalid("expected a style rule".to_string())),
        (None, _) => Err(invalid("no rule found".to_string())),
        (Some(_), Some(_)) => Err(invalid("expected exactly one rule".to_string())),
    }
}

fn convert_style_rule(style_rule: &StyleRule<'_>) -> Result<OwnedRule> {
    let mut selectors = Vec::new();
    for selector in &style_rule.selectors.0 {
        let text = selector
            .to_css_string(PrinterOptions::default())
            .map_err(|e| invalid(e.to_string()))?;
        selectors.push(text);
    }

    let block = &style_rule.declarations;
    let mut declarations = Vec::new();
    for property in &block.declarations {
        declarations.push(convert_declaration(property, false)?);
    }
    for property in &block.important_declarations {
        declarations.push(convert_declaration(property, true)?);
    }

    Ok(OwnedRule {
        selectors,
        declarations,
    })
}

fn convert_declaration(property: &Property<'_>, important: bool) -> Result<OwnedDeclaration> {
    let value = property
        .value_to_css_string(PrinterOptions::default())
        .map_err(|e| invalid(e.to_string()))?;
    Ok(OwnedDeclaration {
        property: property.property_id().name().to_string(),
        value,
        important,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_body_block_is_valid() {
        let replacement = Replacement::default_body().unwrap();
        assert_eq!(replacement.selector(), "body");
        assert_eq!(replacement.text(), DEFAULT_BODY_BLOCK);

        let properties: Vec<_> = replacement
            .declarations()
            .iter()
            .map(|decl| decl.property.as_str())
            .collect();
        for expected in ["font-family", "color", "line-height", "min-height", "overflow-x"] {
            assert!(properties.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn default_body_block_is_matched_by_its_own_pattern() {
        let replacement = Replacement::default_body().unwrap();
        assert!(replacement.pattern().matches_whole(DEFAULT_BODY_BLOCK));
    }

    #[test]
    fn rejects_other_selector() {
        let err = Replacement::new("body", ".foo { color: red; }").unwrap_err();
        assert!(matches!(err, PatchError::InvalidReplacement { .. }));
    }

    #[test]
    fn rejects_nested_braces() {
        let err = Replacement::new("body", "body { .inner { color: red; } }").unwrap_err();
        assert!(matches!(err, PatchError::InvalidReplacement { .. }));
    }

    #[test]
    fn rejects_trailing_text() {
        let err =
            Replacement::new("body", "body { color: red; } .foo { color: blue; }").unwrap_err();
        assert!(matches!(err, PatchError::InvalidReplacement { .. }));
    }

    #[test]
    fn rejects_unparsable_css() {
        let err = Replacement::new("body", "body { color: red; @@@ ; }").unwrap_err();
        assert!(matches!(err, PatchError::InvalidReplacement { .. }));

        let err = Replacement::new("body", "body { color: red; ] }").unwrap_err();
        assert!(matches!(err, PatchError::InvalidReplacement { .. }));
    }

    #[test]
    fn accepts_selector_lists() {
        let replacement = Replacement::new("h1, h2", "h1, h2 { color: red; }").unwrap();
        assert_eq!(replacement.declarations().len(), 1);
        assert_eq!(replacement.declarations()[0].property, "color");
    }

    #[test]
    fn important_declarations_are_flagged() {
        let replacement = Replacement::new("body", "body { margin: 0 !important; }").unwrap();
        let decl = &replacement.declarations()[0];
        assert_eq!(decl.property, "margin");
        assert!(decl.important);
    }
}
