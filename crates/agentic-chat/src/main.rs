//! A terminal client for an agentic chat backend.
//!
//! The backend is reached over HTTP, see the `AGENTIC_CHAT_*` environment
//! variables in `config.rs`. Type a message at the `> ` prompt, `/clear`
//! to start a new conversation or `/quit` to exit. When the assistant
//! requests tool calls, the client asks for each result in turn.

#[macro_use]
extern crate tracing;

mod config;
mod event_view;
mod markup;
mod terminal;

use std::sync::Arc;

use agentic_chat_core::ChatBuilder;
use agentic_chat_http_backend::HttpBackend;
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::event_view::{EventView, UiEvent};
use crate::terminal::{Terminal, Waited, flush};

enum Command<'a> {
    Quit,
    Clear,
    Send(&'a str),
    Nothing,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Nothing,
        "/quit" | "/exit" => Command::Quit,
        "/clear" | "/new" => Command::Clear,
        text => Command::Send(text),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();
    for warning in &config.warnings {
        eprintln!("{}", warning.bright_yellow());
    }
    debug!("starting with {config:?}");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let view = Arc::new(EventView::new(event_tx.clone()));
    let chat = ChatBuilder::with_backend(HttpBackend::new(config.backend), view)
        .with_config(config.client)
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(UiEvent::Idle).ok();
            }
        })
        .on_tool_settled({
            let event_tx = event_tx.clone();
            move |id, outcome| {
                event_tx
                    .send(UiEvent::ToolSettled(id.to_owned(), outcome))
                    .ok();
            }
        })
        .build();
    drop(event_tx);

    let mut terminal = Terminal::new(event_rx);
    terminal.drain();
    let mut input = io::BufReader::new(io::stdin()).lines();

    'outer: loop {
        print!("> ");
        flush();

        let Some(line) = read_line(&mut input).await else {
            break;
        };
        let text = match parse_command(&line) {
            Command::Quit => break,
            Command::Nothing => continue,
            Command::Clear => {
                if chat.clear_conversation().is_err() {
                    break;
                }
                // The conversation clears its tool calls while handling
                // the request, so query both in that order.
                chat.conversation_id().await.ok();
                chat.tool_calls().pending_tool_call_ids().await.ok();
                terminal.drain();
                continue;
            }
            Command::Send(text) => text,
        };

        if chat.send_message(text).is_err() {
            break;
        }
        let waited = terminal
            .wait_for("🤔 Thinking...", |event| {
                matches!(event, UiEvent::Idle)
            })
            .await;
        if let Waited::Closed = waited {
            break;
        }

        // Collect tool results until the backend stops asking for them.
        loop {
            // Also makes sure the latest forms have been received.
            let Ok(pending) = chat.tool_calls().pending_tool_call_ids().await
            else {
                break 'outer;
            };
            terminal.drain();
            let Some(id) = pending.first() else {
                break;
            };

            let name = terminal
                .form(id)
                .map(|form| form.name.clone())
                .unwrap_or_default();
            print!("Result for {} [{}]: ", name.bright_white().bold(), id);
            flush();
            let Some(line) = read_line(&mut input).await else {
                break 'outer;
            };
            if let Command::Quit = parse_command(&line) {
                break 'outer;
            }

            if chat.tool_calls().handle_tool_result(id, &line).is_err() {
                break 'outer;
            }
            let waited = terminal
                .wait_for("📨 Submitting result...", |event| {
                    matches!(
                        event,
                        UiEvent::ToolSettled(settled, _) if settled == id
                    )
                })
                .await;
            if let Waited::Closed = waited {
                break 'outer;
            }
        }
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(
    input: &mut Lines<R>,
) -> Option<String> {
    match input.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
