//! Markdown-lite formatting of assistant messages.

use std::sync::LazyLock;

use regex::Regex;

struct Rule {
    pattern: LazyLock<Regex>,
    replacement: &'static str,
}

macro_rules! rule {
    ($pattern:literal => $replacement:literal) => {
        Rule {
            pattern: LazyLock::new(|| {
                Regex::new($pattern).expect("formatting rule must compile")
            }),
            replacement: $replacement,
        }
    };
}

// Order matters: a later rule must never see the backticks or asterisks an
// earlier rule has already consumed.
static RULES: [Rule; 6] = [
    rule!(r"```([^`]+)```" => "<pre><code>${1}</code></pre>"),
    rule!(r"`([^`]+)`" => "<code>${1}</code>"),
    rule!(
        r"\[([^\]]+)\]\(([^)]+)\)"
            => r#"<a href="${2}" target="_blank">${1}</a>"#
    ),
    rule!(r"\*\*([^*]+)\*\*" => "<strong>${1}</strong>"),
    rule!(r"\*([^*]+)\*" => "<em>${1}</em>"),
    rule!(r"\n" => "<br>"),
];

/// Converts the raw text of an assistant message into the markup shown in
/// the conversation view.
///
/// Supported syntax, applied in this order: fenced code blocks, inline
/// code, `[text](url)` links, `**bold**`, `*italics*` and newlines. Every
/// rule replaces all of its non-overlapping matches and is applied once.
pub fn format_message(text: &str) -> String {
    let mut formatted = text.to_owned();
    for rule in &RULES {
        formatted = rule
            .pattern
            .replace_all(&formatted, rule.replacement)
            .into_owned();
    }
    formatted
}
