//! # Context Chatbot CLI (`chatbot`)
//!
//! Terminal front end for the chatbot backend: upload PDFs, ask questions,
//! and hold an interactive conversation.
//!
//! ## Usage
//!
//! ```bash
//! chatbot --config ./config/chatbot.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chatbot status` | Show the backend URL and its greeting |
//! | `chatbot upload <file>` | Upload a PDF to the Document Service |
//! | `chatbot ask "<question>"` | Ask one question and print the answer |
//! | `chatbot chat` | Interactive chat session |
//! | `chatbot reset` | Clear the server-side conversation |
//! | `chatbot completions <shell>` | Print a shell completion script |

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use context_chatbot::backend::HttpBackend;
use context_chatbot::config::{self, Config};
use context_chatbot::logging;
use context_chatbot::repl::{self, render_exchange};
use context_chatbot::session::{ChatSession, SubmitOutcome};
use context_chatbot::upload::upload_document;

const DEFAULT_CONFIG: &str = "./config/chatbot.toml";

/// Context Chatbot CLI: ask questions about your uploaded documents.
///
/// Settings are read from a TOML file. When `--config` is not given and
/// `./config/chatbot.toml` does not exist, built-in defaults are used
/// (backend at `http://localhost:8080`).
#[derive(Parser)]
#[command(
    name = "chatbot",
    about = "Context Chatbot: ask questions about your uploaded documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults to `./config/chatbot.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend hostname, overriding `[backend].host`.
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    ///
    /// Type questions line by line. `/reset` clears the conversation,
    /// `/history` shows it, `/quit` exits.
    Chat,

    /// Ask a single question and print the answer.
    ///
    /// Exits non-zero when the Answer Service could not be reached.
    Ask {
        /// Question text. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Print the exchange as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Clear the server-side conversation state.
    Reset,

    /// Upload a PDF document to the Document Service.
    Upload {
        /// Path to a `.pdf` file.
        file: Option<PathBuf>,
    },

    /// Show the backend address and check that it responds.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            config::load_config(Path::new(DEFAULT_CONFIG))?
        }
        None => Config::minimal(),
    };
    if let Some(host) = &cli.host {
        cfg.backend.host = host.clone();
        cfg.validate()?;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "chatbot", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = resolve_config(&cli)?;
    logging::init_logging(&cfg.logging)?;
    let backend = Arc::new(HttpBackend::from_config(&cfg.backend)?);

    let ok = match cli.command {
        Commands::Chat => {
            let session = ChatSession::new(backend);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let show_prompt = atty::is(atty::Stream::Stdin);
            repl::run_chat(&session, stdin, &mut std::io::stdout(), show_prompt).await?;
            true
        }
        Commands::Ask { question, json } => {
            let session = ChatSession::new(backend);
            match session.submit_question(&question.join(" ")).await {
                SubmitOutcome::Answered(ex) | SubmitOutcome::Failed(ex) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&ex)?);
                    } else {
                        println!("{}", render_exchange(&ex));
                    }
                    !ex.is_error()
                }
                SubmitOutcome::Skipped | SubmitOutcome::Discarded => {
                    eprintln!("Error: question must not be empty");
                    false
                }
            }
        }
        Commands::Reset => {
            let session = ChatSession::new(backend);
            let notice = session.reset().await;
            println!("{}", notice);
            notice.is_confirmed()
        }
        Commands::Upload { file } => {
            let notice = upload_document(backend.as_ref(), file.as_deref()).await;
            println!("{}", notice);
            notice.is_uploaded()
        }
        Commands::Status => {
            println!("backend: {}", backend.base_url());
            match backend.greeting().await {
                Ok(resp) => {
                    println!("status:  ok");
                    if let Some(msg) = resp.into_message() {
                        println!("message: {}", msg);
                    }
                    true
                }
                Err(e) => {
                    println!("status:  unreachable ({})", e);
                    false
                }
            }
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
