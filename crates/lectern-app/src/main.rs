//! Lectern console binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Build the knowledge base (built-in or from a TOML file)
//! 3. Open the history store and start an assistant session
//! 4. Answer one `--message`, or run the interactive loop until `/quit`,
//!    end of input, or Ctrl-C

mod cli;
mod console;
mod signal;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use lectern_assistant::{
    AssistantSession, HistoryStore, JsonFileHistory, KnowledgeBase, MemoryHistory, Responder,
    SessionOptions, ThinkingDelay,
};
use lectern_core::config::{expand_home, LecternConfig};

use crate::cli::CliArgs;
use crate::console::{render, Command, ConsoleNavigator, HELP};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = LecternConfig::load_or_default(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }
    if let Some(personality) = args.resolve_personality() {
        config.assistant.personality = personality;
    }

    // Logs go to stderr so they never interleave with the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Lectern v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    let knowledge = match config.assistant.knowledge_base_path {
        Some(ref path) => KnowledgeBase::load(&expand_home(path))?,
        None => KnowledgeBase::builtin(),
    };

    let store: Box<dyn HistoryStore> = if config.assistant.persist_history {
        let path = config.history_path();
        tracing::info!(path = %path.display(), "Conversation history enabled");
        Box::new(JsonFileHistory::new(path))
    } else {
        Box::new(MemoryHistory::new())
    };

    let mut options = SessionOptions::from(&config.assistant);
    if args.no_delay {
        options.thinking_delay = ThinkingDelay::none();
    }

    let responder = Responder::new(knowledge).with_threshold(config.assistant.relevance_threshold);
    let mut session = AssistantSession::new(responder, store, options);
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(signal::forward_interrupt(tokio::signal::ctrl_c(), shutdown_tx));

    if let Some(ref message) = args.message {
        answer(&mut session, message, &mut shutdown_rx).await;
        return Ok(());
    }

    if let Some(turn) = session.log().last() {
        println!("{}\n", render(&turn.text));
    }
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let line = tokio::select! {
            _ = shutdown_rx.changed() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            },
        };

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(command) => run_command(&mut session, command),
            None => {
                if !answer(&mut session, &line, &mut shutdown_rx).await {
                    break;
                }
            }
        }
    }

    tracing::info!(turns = session.log().len(), "Session ended");
    Ok(())
}

/// Send one message and print the reply. Returns `false` if shutdown
/// interrupted the reply.
async fn answer(
    session: &mut AssistantSession,
    message: &str,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    let Some(pending) = session.submit(message) else {
        return true;
    };
    if !pending.delay.is_zero() {
        println!("  …thinking");
    }
    match session.deliver(pending, shutdown).await {
        Some(turn) => {
            println!("\n{}\n", render(&turn.text));
            true
        }
        None => false,
    }
}

fn run_command(session: &mut AssistantSession, command: Command) {
    match command {
        Command::Help => println!("{}", HELP),
        Command::Clear => {
            session.clear_history();
            if let Some(turn) = session.log().last() {
                println!("\n{}\n", render(&turn.text));
            }
        }
        Command::Stats => {
            let stats = session.stats();
            println!("Turns:          {}", stats.total_turns);
            println!("Topics known:   {}", stats.knowledge_base_size);
            println!(
                "Personality:    {} (of {})",
                stats.current_personality, stats.available_personalities
            );
            let recent = session.recent_topics();
            if !recent.is_empty() {
                println!("Recent topics:  {}", recent.join(", "));
            }
        }
        Command::Personality(name) => match session.switch_personality(&name) {
            Ok(_) => print_last(session),
            Err(e) => println!("{}", e),
        },
        Command::Action(name) => {
            let mut navigator = ConsoleNavigator;
            match session.activate_named(&name, &mut navigator) {
                Ok(outcome) => {
                    println!("{}", render(&outcome.announcement));
                    if let Some(follow_up) = outcome.follow_up {
                        println!("\n{}\n", render(&follow_up.content));
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        Command::Unknown(line) => println!("Unknown command: {} (try /help)", line),
        Command::Quit => {}
    }
}

fn print_last(session: &AssistantSession) {
    if let Some(turn) = session.log().last() {
        println!("{}", render(&turn.text));
    }
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}
