//! Interactive chat loop for `chatbot chat`.
//!
//! Reads one line at a time. Plain lines are questions; lines starting
//! with `/` are commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/reset` | Clear the conversation and print the server's notice |
//! | `/history` | Print the whole transcript |
//! | `/help` | List commands |
//! | `/quit` | Leave (EOF works too) |
//!
//! A question that itself starts with `/` is sent by doubling the slash:
//! `//etc/hosts?` asks `/etc/hosts?`.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::models::Exchange;
use crate::session::{ChatSession, SubmitOutcome};

pub const EMPTY_TRANSCRIPT: &str = "No messages yet. Start the conversation!";

const HELP: &str = "\
Type a question and press Enter.
  /reset    clear the conversation
  /history  show the conversation so far
  /help     show this help
  /quit     exit
Start a line with // to ask a question beginning with /.";

#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    Ask(&'a str),
    Reset,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> ChatCommand<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/reset" => ChatCommand::Reset,
        "/history" => ChatCommand::History,
        "/help" | "/?" => ChatCommand::Help,
        "/quit" | "/exit" => ChatCommand::Quit,
        escaped if escaped.starts_with("//") => ChatCommand::Ask(&escaped[1..]),
        cmd if cmd.starts_with('/') => ChatCommand::Unknown(cmd),
        _ => ChatCommand::Ask(line),
    }
}

/// Format one exchange the way the chat view shows it.
pub fn render_exchange(ex: &Exchange) -> String {
    format!("You: {}\nAI ({}): {}", ex.question, ex.mode, ex.answer)
}

/// Format a whole transcript, or the empty-state hint.
pub fn render_transcript(exchanges: &[Exchange]) -> String {
    if exchanges.is_empty() {
        return EMPTY_TRANSCRIPT.to_string();
    }
    exchanges
        .iter()
        .map(render_exchange)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Run the chat loop until `/quit` or end of input.
///
/// `show_prompt` controls the `> ` prompt; the binary enables it only when
/// stdin is a terminal.
pub async fn run_chat<R, W>(
    session: &ChatSession,
    input: R,
    out: &mut W,
    show_prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    if show_prompt {
        writeln!(out, "{}\n", HELP)?;
    }

    loop {
        if show_prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            ChatCommand::Ask(text) => match session.submit_question(text).await {
                SubmitOutcome::Skipped | SubmitOutcome::Discarded => {}
                SubmitOutcome::Answered(ex) | SubmitOutcome::Failed(ex) => {
                    writeln!(out, "{}\n", render_exchange(&ex))?;
                }
            },
            ChatCommand::Reset => {
                let notice = session.reset().await;
                writeln!(out, "{}\n", notice)?;
            }
            ChatCommand::History => {
                writeln!(out, "{}\n", render_transcript(&session.transcript()))?;
            }
            ChatCommand::Help => writeln!(out, "{}\n", HELP)?,
            ChatCommand::Quit => break,
            ChatCommand::Unknown(cmd) => {
                writeln!(out, "Unknown command: {} (try /help, or // to ask it)\n", cmd)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
