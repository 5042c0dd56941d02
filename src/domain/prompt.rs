//! Prompt templates and summary clean-up

use crate::error::{DigestError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Substitution point for the entry text
pub const PLACEHOLDER: &str = "{entry_text}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "Write a concise, one to three sentence summary of the following journal entry I wrote /no_think:\n\n{entry_text}";

/// Regex for reasoning blocks some models emit before the answer
fn think_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>").unwrap())
}

/// A prompt with exactly one `{entry_text}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let count = template.matches(PLACEHOLDER).count();
        if count != 1 {
            return Err(DigestError::InvalidPrompt(format!(
                "Prompt template must contain the {} placeholder exactly once (found {})",
                PLACEHOLDER, count
            )));
        }

        Ok(PromptTemplate {
            template: template.to_string(),
        })
    }

    /// Substitute the entry body into the template
    pub fn render(&self, body: &str) -> String {
        self.template.replacen(PLACEHOLDER, body, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        PromptTemplate {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

/// Strip `<think>` blocks and surrounding whitespace from model output
pub fn clean_summary(raw: &str) -> String {
    think_regex().replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_valid() {
        let template = PromptTemplate::parse(DEFAULT_PROMPT_TEMPLATE).unwrap();
        assert_eq!(template, PromptTemplate::default());
    }

    #[test]
    fn test_render_substitutes_body() {
        let template = PromptTemplate::parse("Summarize:\n\n{entry_text}\n\nThanks").unwrap();
        assert_eq!(
            template.render("Went hiking."),
            "Summarize:\n\nWent hiking.\n\nThanks"
        );
    }

    #[test]
    fn test_render_does_not_expand_placeholder_in_body() {
        let template = PromptTemplate::parse("{entry_text}").unwrap();
        assert_eq!(template.render("literal {entry_text}"), "literal {entry_text}");
    }

    #[test]
    fn test_missing_placeholder_rejected() {
        let err = PromptTemplate::parse("Summarize this").unwrap_err();
        assert!(matches!(err, DigestError::InvalidPrompt(_)));
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn test_repeated_placeholder_rejected() {
        let err = PromptTemplate::parse("{entry_text} and {entry_text}").unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_clean_summary_strips_think_blocks() {
        let raw = "<think>\nLet me consider\nthis.\n</think>\n\nA calm day outdoors.  ";
        assert_eq!(clean_summary(raw), "A calm day outdoors.");
    }

    #[test]
    fn test_clean_summary_multiple_blocks() {
        let raw = "<think>a</think>First.<think>b</think> Second.";
        assert_eq!(clean_summary(raw), "First. Second.");
    }

    #[test]
    fn test_clean_summary_plain_text() {
        assert_eq!(clean_summary("  Just text.\n"), "Just text.");
        assert_eq!(clean_summary("<think></think>"), "");
    }
}
