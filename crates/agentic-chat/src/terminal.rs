use std::io::Write as _;
use std::time::Duration;

use agentic_chat_core::tool_call::SubmitOutcome;
use agentic_chat_core::{Status, ToolCallForm};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::event_view::UiEvent;
use crate::markup::MarkupPrinter;

const BAR_CHAR: &str = "▎";

/// Why [`Terminal::wait_for`] returned.
pub enum Waited {
    /// The awaited event arrived.
    Done,
    /// The event channel was closed.
    Closed,
}

/// Draws [`UiEvent`]s on the terminal.
///
/// This is the only writer to stdout while a turn is running.
pub struct Terminal {
    event_rx: mpsc::UnboundedReceiver<UiEvent>,
    printer: MarkupPrinter,
    progress_style: ProgressStyle,
    spinner_message: &'static str,
    forms: Vec<ToolCallForm>,
    label: String,
    // Assistant messages still being typed. Every message, user or
    // assistant, ends with one scroll.
    open_messages: isize,
    line_open: bool,
}

impl Terminal {
    pub fn new(event_rx: mpsc::UnboundedReceiver<UiEvent>) -> Self {
        let progress_style =
            ProgressStyle::with_template("{spinner} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        Self {
            event_rx,
            printer: MarkupPrinter::default(),
            progress_style,
            spinner_message: "",
            forms: vec![],
            label: String::new(),
            open_messages: 0,
            line_open: false,
        }
    }

    /// Returns the form of the tool call `id`, if it is displayed.
    pub fn form(&self, id: &str) -> Option<&ToolCallForm> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// Handles events until one matches `done` and every assistant message
    /// has been typed out, showing a spinner with `message` meanwhile.
    pub async fn wait_for(
        &mut self,
        message: &'static str,
        done: impl Fn(&UiEvent) -> bool,
    ) -> Waited {
        self.spinner_message = message;
        let mut matched = false;
        let mut progress_bar: Option<ProgressBar> = None;

        while !(matched && self.open_messages <= 0) {
            if self.open_messages <= 0 && !matched {
                // Create a new progress bar if it has been finished.
                progress_bar
                    .get_or_insert_with(|| {
                        let progress_bar = ProgressBar::new_spinner();
                        progress_bar.set_style(self.progress_style.clone());
                        progress_bar.set_message(self.spinner_message);
                        progress_bar
                    })
                    .inc(1);
            }

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = self.event_rx.recv() => {
                    let Some(event) = event else {
                        return Waited::Closed;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = progress_bar.take() {
                progress_bar.finish_and_clear();
            }

            matched |= done(&event);
            self.handle(event);
        }

        self.close_line();
        Waited::Done
    }

    /// Handles the events already queued, without waiting.
    pub fn drain(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle(event);
        }
        self.close_line();
    }

    fn handle(&mut self, event: UiEvent) {
        trace!("ui event: {event:?}");
        match event {
            UiEvent::UserMessage => {
                self.open_messages += 1;
            }
            UiEvent::AssistantAppended(id) => {
                self.open_messages += 1;
                self.printer.begin(id);
                self.close_line();
                print!("{}🤖 ", BAR_CHAR.bright_cyan());
                self.line_open = true;
            }
            UiEvent::AssistantUpdated(id, html) => {
                for span in self.printer.advance(id, &html) {
                    print!("{}", span.paint());
                }
                flush();
            }
            UiEvent::Scrolled => {
                self.open_messages -= 1;
            }
            UiEvent::MessagesCleared => {
                self.printer.clear();
                self.println(format!("{}", "(conversation cleared)".dimmed()));
            }
            UiEvent::ToolCallsRendered(forms) => {
                let bar = BAR_CHAR.bright_yellow();
                self.println(format!(
                    "{bar}🛠️  The assistant needs {} tool result(s):",
                    forms.len()
                ));
                for form in &forms {
                    self.println(format!(
                        "{bar}{} [{}]",
                        form.name.bright_white().bold(),
                        form.id.dimmed()
                    ));
                    for line in form.input.lines() {
                        self.println(format!("{bar}  {line}"));
                    }
                }
                self.forms = forms;
            }
            UiEvent::ToolCallsCleared => {
                self.forms.clear();
            }
            UiEvent::ToolResultShown(id, result) => {
                self.println(format!(
                    "{}✅ {} {}",
                    BAR_CHAR.bright_green(),
                    id.dimmed(),
                    result
                ));
            }
            UiEvent::Alert(text) => {
                self.println(format!(
                    "{}⚠️  {}",
                    BAR_CHAR.bright_yellow(),
                    text.bright_yellow()
                ));
            }
            UiEvent::Status(status) => {
                if status == Status::Error {
                    debug!("status: {status}");
                }
            }
            UiEvent::ConversationLabel(label) => {
                if label != self.label {
                    self.println(format!("{}", label.dimmed()));
                    self.label = label;
                }
            }
            UiEvent::ToolSettled(id, outcome) => {
                if let SubmitOutcome::Rejected(err) = outcome {
                    debug!("tool result for {id} rejected: {err}");
                }
            }
            UiEvent::ToolSectionVisible(_)
            | UiEvent::ToolSubmitting(..)
            | UiEvent::InputEnabled(_)
            | UiEvent::Idle => {}
        }
    }

    fn println(&mut self, line: String) {
        self.close_line();
        println!("{line}");
    }

    fn close_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

pub fn flush() {
    if let Err(err) = std::io::stdout().flush() {
        error!("error flushing stdout: {err}");
    }
}
