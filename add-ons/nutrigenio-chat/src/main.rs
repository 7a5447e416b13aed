//! NutriGênio terminal chat.
//!
//! Runs one guided-assessment session on stdin/stdout. Lines starting with `/` are
//! dashboard commands; everything else goes to the assessment.

mod commands;
mod render;

use std::io::Write;

use commands::{Command, Dashboard};
use nutrigenio_core::{ChatConfig, ChatSession, Sender, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[nutrigenio-chat] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ChatConfig::load()?;
    let mut session = ChatSession::open(&config);
    let mut status = session.subscribe();
    let mut dashboard = Dashboard::default();

    tracing::info!(session_id = %session.id(), "nutrigenio-chat started");
    let mut seen = print_new(&session, &config.bot_name, 0);
    println!("{}", commands::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Some(command) = Command::parse(&line) {
                    if command == Command::Quit {
                        break;
                    }
                    let today = chrono::Local::now().date_naive();
                    println!("{}", dashboard.run(&command, &session.profile(), today));
                    continue;
                }
                match session.submit(&line) {
                    SubmitOutcome::Accepted => seen = print_new(&session, &config.bot_name, seen),
                    SubmitOutcome::IgnoredPending => println!("(aguarde a resposta do {})", config.bot_name),
                    SubmitOutcome::IgnoredBlank | SubmitOutcome::IgnoredClosed => {}
                }
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                seen = print_new(&session, &config.bot_name, seen);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("CTRL-C received; closing session");
                break;
            }
        }
    }

    session.close();
    println!("Até logo!");
    Ok(())
}

/// Prints bot messages appended since `seen` and returns the new count. The visitor's own
/// lines are already on the terminal.
fn print_new(session: &ChatSession, bot_name: &str, seen: usize) -> usize {
    let fresh = session.messages_since(seen);
    let chart = if fresh.iter().any(|m| m.is_chart) {
        session.chart()
    } else {
        None
    };
    for message in &fresh {
        if message.sender == Sender::Bot {
            println!("\n{}\n", render::bot_line(bot_name, message, chart.as_ref()));
        }
    }
    if session.is_awaiting_reply() && fresh.iter().any(|m| m.sender == Sender::User) {
        println!("{} está digitando...", bot_name);
    }
    seen + fresh.len()
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
