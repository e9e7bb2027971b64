//! The typing animation as a lazy sequence of reveal steps.
//!
//! Characters outside markup are revealed one at a time with a pause
//! after each. Markup is never typed: a tag is shown at once when its
//! closing `>` is reached.

use std::str::CharIndices;

/// One step of the typing animation.
///
/// The value is a byte offset into the formatted text: after the step,
/// the view shows `text[..end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealStep {
    /// A visible character was revealed, pause before the next step.
    Typed(usize),
    /// A tag was completed, continue without pausing.
    Instant(usize),
}

impl RevealStep {
    /// The end of the prefix to show.
    #[inline]
    pub fn end(&self) -> usize {
        match self {
            RevealStep::Typed(end) | RevealStep::Instant(end) => *end,
        }
    }

    /// Whether a pause follows this step.
    #[inline]
    pub fn pauses(&self) -> bool {
        matches!(self, RevealStep::Typed(_))
    }
}

/// Iterator over the [`RevealStep`]s of a formatted message.
///
/// Cloning the iterator restarts nothing, it forks the sequence at the
/// current position. Call [`reveal_steps`] again to start over.
#[derive(Clone, Debug)]
pub struct RevealSteps<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    in_tag: bool,
    flushed: bool,
}

/// Returns the reveal steps of `html`.
///
/// The last step always ends at `html.len()`, so the whole text is shown
/// once the sequence is exhausted, even if a `<` is never closed.
#[inline]
pub fn reveal_steps(html: &str) -> RevealSteps<'_> {
    RevealSteps {
        text: html,
        chars: html.char_indices(),
        in_tag: false,
        flushed: false,
    }
}

impl Iterator for RevealSteps<'_> {
    type Item = RevealStep;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, ch) in self.chars.by_ref() {
            let end = idx + ch.len_utf8();
            if ch == '<' {
                self.in_tag = true;
            }
            if !self.in_tag {
                return Some(RevealStep::Typed(end));
            }
            if ch == '>' {
                self.in_tag = false;
                return Some(RevealStep::Instant(end));
            }
        }

        if self.in_tag && !self.flushed {
            self.flushed = true;
            return Some(RevealStep::Instant(self.text.len()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::RevealStep::*;
    use super::*;

    #[test]
    fn test_plain_text() {
        let steps: Vec<_> = reveal_steps("hi").collect();
        assert_eq!(steps, vec![Typed(1), Typed(2)]);
    }

    #[test]
    fn test_tags_are_instant() {
        let html = "a<em>b</em>";
        let steps: Vec<_> = reveal_steps(html).collect();
        assert_eq!(
            steps,
            vec![Typed(1), Instant(5), Typed(6), Instant(11)]
        );
        assert_eq!(&html[..steps[1].end()], "a<em>");
        assert_eq!(steps.iter().filter(|s| s.pauses()).count(), 2);
    }

    #[test]
    fn test_multibyte_characters() {
        let html = "é<br>";
        let steps: Vec<_> = reveal_steps(html).collect();
        assert_eq!(steps, vec![Typed(2), Instant(6)]);
    }

    #[test]
    fn test_unterminated_tag_is_flushed() {
        let html = "a < b";
        let steps: Vec<_> = reveal_steps(html).collect();
        assert_eq!(steps, vec![Typed(1), Typed(2), Instant(5)]);
        assert_eq!(steps.last().map(RevealStep::end), Some(html.len()));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(reveal_steps("").next(), None);
    }
}
