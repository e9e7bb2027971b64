//! Terminal rendering of the markup produced for assistant messages.

use std::collections::HashMap;
use std::sync::LazyLock;

use agentic_chat_core::MessageId;
use owo_colors::{OwoColorize, Style};
use regex::Regex;

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="([^"]*)""#).expect("href pattern must compile")
});

/// How a run of text is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub link: bool,
    pub dim: bool,
}

impl MarkStyle {
    fn to_ansi(self) -> Style {
        let mut style = Style::new();
        if self.bold {
            style = style.bold();
        }
        if self.italic {
            style = style.italic();
        }
        if self.code {
            style = style.bright_yellow();
        }
        if self.link {
            style = style.underline().bright_blue();
        }
        if self.dim {
            style = style.dimmed();
        }
        style
    }
}

/// A run of visible text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: MarkStyle,
}

impl Span {
    pub fn paint(&self) -> String {
        self.text.style(self.style.to_ansi()).to_string()
    }
}

#[derive(Default)]
struct Nesting {
    bold: u32,
    italic: u32,
    code: u32,
    links: Vec<String>,
}

impl Nesting {
    fn style(&self) -> MarkStyle {
        MarkStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            code: self.code > 0,
            link: !self.links.is_empty(),
            dim: false,
        }
    }

    fn apply(&mut self, tag: &str, spans: &mut Vec<Span>) {
        let closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let counter = match name.as_str() {
            "br" => {
                push_text(spans, "\n", Nesting::style(self));
                return;
            }
            "strong" | "b" => &mut self.bold,
            "em" | "i" => &mut self.italic,
            "code" | "pre" => &mut self.code,
            "a" if closing => {
                if let Some(href) = self.links.pop() {
                    let style = MarkStyle {
                        dim: true,
                        ..Nesting::style(self)
                    };
                    push_text(spans, &format!(" ({href})"), style);
                }
                return;
            }
            "a" => {
                let href = HREF
                    .captures(tag)
                    .and_then(|caps| caps.get(1))
                    .map(|href| href.as_str().to_owned())
                    .unwrap_or_default();
                self.links.push(href);
                return;
            }
            _ => {
                trace!("ignoring unknown tag: <{tag}>");
                return;
            }
        };
        if closing {
            *counter = counter.saturating_sub(1);
        } else {
            *counter += 1;
        }
    }
}

fn push_text(spans: &mut Vec<Span>, text: &str, style: MarkStyle) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => spans.push(Span {
            text: text.to_owned(),
            style,
        }),
    }
}

/// Splits `html` into styled runs of visible text.
///
/// A `<` without a closing `>` is shown as text.
pub fn spans(html: &str) -> Vec<Span> {
    let mut spans = vec![];
    let mut nesting = Nesting::default();
    let mut rest = html;

    loop {
        let Some(open) = rest.find('<') else {
            push_text(&mut spans, rest, nesting.style());
            break;
        };
        let Some(close) = rest[open..].find('>').map(|idx| open + idx) else {
            push_text(&mut spans, rest, nesting.style());
            break;
        };
        push_text(&mut spans, &rest[..open], nesting.style());
        nesting.apply(&rest[open + 1..close], &mut spans);
        rest = &rest[close + 1..];
    }
    spans
}

/// Prints assistant messages that grow one update at a time.
#[derive(Default)]
pub struct MarkupPrinter {
    printed: HashMap<MessageId, usize>,
}

impl MarkupPrinter {
    /// Starts tracking a new message.
    pub fn begin(&mut self, id: MessageId) {
        self.printed.insert(id, 0);
    }

    /// Returns the runs of `html` not printed yet for `id`.
    pub fn advance(&mut self, id: MessageId, html: &str) -> Vec<Span> {
        let printed = self.printed.entry(id).or_default();
        let mut skip = *printed;
        let mut total = 0;
        let mut fresh = vec![];
        for span in spans(html) {
            let len = span.text.chars().count();
            total += len;
            if skip >= len {
                skip -= len;
                continue;
            }
            fresh.push(Span {
                text: span.text.chars().skip(skip).collect(),
                style: span.style,
            });
            skip = 0;
        }
        *printed = (*printed).max(total);
        fresh
    }

    /// Forgets every message.
    pub fn clear(&mut self) {
        self.printed.clear();
    }
}
