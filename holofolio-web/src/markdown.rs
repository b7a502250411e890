//! Markdown subset to HTML
//!
//! Project documentation is converted with an ordered table of regex
//! substitutions, each applied once over the whole text. Headings go from
//! the longest marker to the shortest, emphasis runs bold before italic,
//! bullets run last before newlines become line breaks.
//!
//! The pass is not recursive: nested emphasis and escaped markers are not
//! handled, and the text is not HTML-escaped. Documentation files are
//! trusted site content.

use std::sync::LazyLock;

use regex::Regex;

/// One substitution rule
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid markdown rule"),
            replacement,
        }
    }
}

// `(?mR)`: `^`/`$` match at line boundaries and treat `\r\n` as one.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            r"(?mR)^### (.*)$",
            r#"<h4 style="color:gold;margin:20px 0;">${1}</h4>"#,
        ),
        Rule::new(
            r"(?mR)^## (.*)$",
            r#"<h3 style="color:gold;margin:25px 0;">${1}</h3>"#,
        ),
        Rule::new(
            r"(?mR)^# (.*)$",
            r#"<h2 style="color:gold;margin:30px 0;">${1}</h2>"#,
        ),
        Rule::new(r"(?R)\*\*(.*?)\*\*", r#"<strong style="color:#0ff;">${1}</strong>"#),
        Rule::new(r"(?R)\*(.*?)\*", r#"<em style="color:#0ff;">${1}</em>"#),
        Rule::new(
            r"(?mR)^- (.*)$",
            r#"<span style="color:#0ff;">• </span>${1}<br>"#,
        ),
        Rule::new(r"\r?\n", "<br>"),
    ]
});

/// Convert a documentation file to HTML
pub fn render(markdown: &str) -> String {
    RULES.iter().fold(markdown.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    })
}
