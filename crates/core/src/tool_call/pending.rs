use std::collections::HashMap;

use agentic_chat_protocol::{ToolCall, ToolResult};

use super::SubmitError;
use crate::view::ToolCallForm;

/// Where a pending tool call is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PendingState {
    /// Waiting for the human to enter a result.
    #[default]
    Pending,
    /// The result is on its way to the backend.
    Submitting,
}

/// A tool call awaiting its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingToolCall {
    call: ToolCall,
    conversation_id: String,
    state: PendingState,
}

impl PendingToolCall {
    /// The requested call.
    #[inline]
    pub fn call(&self) -> &ToolCall {
        &self.call
    }

    /// The conversation the call belongs to.
    #[inline]
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> PendingState {
        self.state
    }
}

/// What the view should do after [`PendingToolCalls::display`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayDecision {
    /// Hide the tool section, leave the forms alone.
    Hide,
    /// Replace every form with these ones and show the section.
    Render(Vec<ToolCallForm>),
}

/// A result accepted for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// The conversation to submit to.
    pub conversation_id: String,
    /// The trimmed result.
    pub result: ToolResult,
}

/// The outcome of [`PendingToolCalls::complete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Whether the call was still tracked, i.e. its form is still shown.
    pub was_tracked: bool,
    /// Whether nothing is left pending, so the section should be hidden.
    pub hide_section: bool,
}

/// The tool calls displayed for the current turn, in display order.
///
/// The set of tracked calls always equals the set of displayed forms.
#[derive(Clone, Debug, Default)]
pub struct PendingToolCalls {
    order: Vec<String>,
    entries: HashMap<String, PendingToolCall>,
}

impl PendingToolCalls {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `calls` the displayed set.
    ///
    /// An empty list only hides the section and keeps the current calls.
    /// Otherwise every call not in `calls` is dropped, including one whose
    /// result is being submitted.
    pub fn display(
        &mut self,
        calls: Vec<ToolCall>,
        conversation_id: &str,
    ) -> DisplayDecision {
        if calls.is_empty() {
            return DisplayDecision::Hide;
        }

        self.order.clear();
        self.entries.clear();
        for call in calls {
            if self.entries.contains_key(&call.id) {
                warn!("duplicated tool call id: {}", call.id);
            } else {
                self.order.push(call.id.clone());
            }
            // A later duplicate wins, like a map insert.
            self.entries.insert(
                call.id.clone(),
                PendingToolCall {
                    call,
                    conversation_id: conversation_id.to_owned(),
                    state: PendingState::Pending,
                },
            );
        }

        DisplayDecision::Render(
            self.order
                .iter()
                .filter_map(|id| self.entries.get(id))
                .map(|entry| ToolCallForm::from_call(&entry.call))
                .collect(),
        )
    }

    /// Validates `raw_result` for `id` and marks the call as submitting.
    ///
    /// Nothing changes when an error is returned.
    pub fn begin_submit(
        &mut self,
        id: &str,
        raw_result: &str,
    ) -> Result<Submission, SubmitError> {
        let entry = self.entries.get_mut(id).ok_or(SubmitError::NotFound)?;
        if entry.state == PendingState::Submitting {
            return Err(SubmitError::InFlight);
        }
        let result = raw_result.trim();
        if result.is_empty() {
            return Err(SubmitError::EmptyResult);
        }

        entry.state = PendingState::Submitting;
        Ok(Submission {
            conversation_id: entry.conversation_id.clone(),
            result: ToolResult {
                tool_call_id: id.to_owned(),
                result: result.to_owned(),
            },
        })
    }

    /// Stops tracking `id` after its result was accepted.
    pub fn complete(&mut self, id: &str) -> Completion {
        let was_tracked = self.entries.remove(id).is_some();
        if was_tracked {
            self.order.retain(|tracked| tracked != id);
        }
        Completion {
            was_tracked,
            hide_section: was_tracked && self.entries.is_empty(),
        }
    }

    /// Puts `id` back to [`PendingState::Pending`] after a failed
    /// submission. Returns `false` if the call is no longer tracked.
    pub fn fail(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.state = PendingState::Pending;
                true
            }
            None => false,
        }
    }

    /// Forgets every call.
    #[inline]
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    /// Whether any call is tracked.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of tracked calls.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no call is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of the tracked calls, in display order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns the tracked call `id`.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&PendingToolCall> {
        self.entries.get(id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn call(id: &str) -> ToolCall {
        ToolCall {
            id: id.to_owned(),
            name: "lookup".to_owned(),
            input: json!({ "q": id }),
        }
    }

    fn ids(pending: &PendingToolCalls) -> Vec<&str> {
        pending.ids().collect()
    }

    #[test]
    fn test_display_replaces_tracked_set() {
        let mut pending = PendingToolCalls::new();

        let decision = pending.display(vec![call("t1"), call("t2")], "c1");
        let DisplayDecision::Render(forms) = decision else {
            panic!("expected forms");
        };
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].id, "t1");
        assert_eq!(ids(&pending), vec!["t1", "t2"]);

        pending.display(vec![call("t3")], "c2");
        assert_eq!(ids(&pending), vec!["t3"]);
        assert_eq!(pending.get("t3").unwrap().conversation_id(), "c2");
        assert!(pending.get("t1").is_none());

        // An empty list hides the section and keeps the calls.
        assert_eq!(pending.display(vec![], "c2"), DisplayDecision::Hide);
        assert_eq!(ids(&pending), vec!["t3"]);
    }

    #[test]
    fn test_duplicated_ids() {
        let mut pending = PendingToolCalls::new();
        let mut second = call("t1");
        second.name = "search".to_owned();

        let decision = pending.display(vec![call("t1"), second], "c1");
        let DisplayDecision::Render(forms) = decision else {
            panic!("expected forms");
        };
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].name, "search");
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_submit_validation() {
        let mut pending = PendingToolCalls::new();
        pending.display(vec![call("t1")], "c1");

        assert_eq!(
            pending.begin_submit("nope", "42"),
            Err(SubmitError::NotFound)
        );
        assert_eq!(
            pending.begin_submit("t1", "  \n"),
            Err(SubmitError::EmptyResult)
        );
        assert_eq!(pending.get("t1").unwrap().state(), PendingState::Pending);

        let submission = pending.begin_submit("t1", " 42 ").unwrap();
        assert_eq!(submission.conversation_id, "c1");
        assert_eq!(submission.result.tool_call_id, "t1");
        assert_eq!(submission.result.result, "42");
        assert_eq!(
            pending.get("t1").unwrap().state(),
            PendingState::Submitting
        );
        assert_eq!(
            pending.begin_submit("t1", "42"),
            Err(SubmitError::InFlight)
        );
    }

    #[test]
    fn test_complete_and_fail() {
        let mut pending = PendingToolCalls::new();
        pending.display(vec![call("t1"), call("t2")], "c1");

        pending.begin_submit("t1", "a").unwrap();
        assert!(pending.fail("t1"));
        assert_eq!(pending.get("t1").unwrap().state(), PendingState::Pending);
        assert_eq!(pending.len(), 2);

        pending.begin_submit("t1", "a").unwrap();
        assert_eq!(
            pending.complete("t1"),
            Completion {
                was_tracked: true,
                hide_section: false,
            }
        );
        assert_eq!(
            pending.complete("t2"),
            Completion {
                was_tracked: true,
                hide_section: true,
            }
        );
        assert!(!pending.has_pending());
        assert_eq!(
            pending.complete("t2"),
            Completion {
                was_tracked: false,
                hide_section: false,
            }
        );
        assert!(!pending.fail("t2"));
    }

    #[test]
    fn test_clear() {
        let mut pending = PendingToolCalls::new();
        pending.display(vec![call("t1")], "c1");
        pending.clear();
        assert!(pending.is_empty());
        assert_eq!(ids(&pending), Vec::<&str>::new());
    }
}
