//! OrderMate terminal REPL.
//!
//! The hosting layer: renders transcripts, forwards raw user text plus the
//! mode selection to the session controller, and manages session switching.
//! All engine logic lives in `ordermate-core`.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use ordermate_core::orders::OrderTable;
use ordermate_core::session::{
    ChatMode, SessionController, TranscriptRepository, TurnOutcome, GENERATION_FAILURE_REPLY,
};
use ordermate_infrastructure::{load_order_table, OrdermatePaths, TextTranscriptRepository};
use ordermate_interaction::{CompletionApiGenerator, GeneratorConfig};

#[derive(Parser)]
#[command(name = "ordermate")]
#[command(about = "OrderMate - conversational sales order assistant", long_about = None)]
struct Cli {
    /// Chat mode to start in: freeform or orders
    #[arg(long, default_value = "freeform")]
    mode: String,

    /// Base directory for config and transcripts (defaults to ~/.config/ordermate)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Path to the order table JSON file (defaults to orders.json under the base directory)
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Storage key of a persisted session to resume (e.g. chat_20240301_101500.txt)
    #[arg(long)]
    resume: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/mode".to_string(),
                "/new".to_string(),
                "/sessions".to_string(),
                "/load".to_string(),
                "/quit".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn load_orders(cli: &Cli, paths: &OrdermatePaths) -> Result<OrderTable> {
    if let Some(path) = &cli.orders {
        return load_order_table(path)
            .with_context(|| format!("failed to load order table from {}", path.display()));
    }

    let default_path = paths.orders_file();
    if default_path.exists() {
        return load_order_table(&default_path)
            .with_context(|| format!("failed to load order table from {}", default_path.display()));
    }

    println!(
        "{}",
        "No order table found; order queries will report every order as unknown."
            .bright_black()
    );
    Ok(OrderTable::sales_orders())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mode = ChatMode::parse(&cli.mode)
        .ok_or_else(|| anyhow!("unknown mode '{}'; use freeform or orders", cli.mode))?;

    let paths = match &cli.storage_dir {
        Some(dir) => OrdermatePaths::new(dir.clone()),
        None => OrdermatePaths::default_location()?,
    };

    let repository = Arc::new(TextTranscriptRepository::new(paths.conversation_dir())?);
    let generator_config = GeneratorConfig::load(paths.config_file())?;
    let params = generator_config.params.clone();
    let generator = Arc::new(CompletionApiGenerator::from_config(&generator_config));
    let orders = Arc::new(load_orders(&cli, &paths)?);

    let mut controller = match &cli.resume {
        Some(storage_key) => {
            SessionController::resume(
                storage_key,
                mode,
                repository.clone(),
                generator.clone(),
                orders.clone(),
            )
            .await
            .with_context(|| format!("failed to resume session '{}'", storage_key))?
        }
        None => SessionController::new(
            mode,
            repository.clone(),
            generator.clone(),
            orders.clone(),
        ),
    }
    .with_params(params);

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== OrderMate ===".bright_magenta().bold());
    println!(
        "{}",
        "Commands: /mode <freeform|orders>, /new, /sessions, /load <key>, /quit".bright_black()
    );
    println!(
        "{}",
        format!(
            "Session {} ({} mode)",
            controller.session().id,
            controller.session().mode
        )
        .bright_black()
    );
    for message in &controller.session().messages {
        println!("{}", format!("{}: {}", message.sender, message.content).bright_black());
    }
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let trimmed = line.trim();
                if trimmed.starts_with('/') {
                    let mut parts = trimmed.splitn(2, ' ');
                    let command = parts.next().unwrap_or_default();
                    let argument = parts.next().unwrap_or("").trim();

                    match command {
                        "/quit" => {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                        "/mode" => match ChatMode::parse(argument) {
                            Some(mode) => {
                                controller.set_mode(mode);
                                println!("{}", format!("Mode set to {}", mode).bright_black());
                            }
                            None => {
                                println!(
                                    "{}",
                                    "Usage: /mode <freeform|orders>".yellow()
                                );
                            }
                        },
                        "/new" => {
                            let mode = controller.session().mode;
                            controller = SessionController::new(
                                mode,
                                repository.clone(),
                                generator.clone(),
                                orders.clone(),
                            )
                            .with_params(generator_config.params.clone());
                            println!(
                                "{}",
                                format!("Started session {}", controller.session().id)
                                    .bright_black()
                            );
                        }
                        "/sessions" => match repository.list().await {
                            Ok(keys) if keys.is_empty() => {
                                println!("{}", "No stored sessions.".bright_black());
                            }
                            Ok(keys) => {
                                for key in keys {
                                    println!("{}", key.bright_black());
                                }
                            }
                            Err(err) => {
                                eprintln!("{}", format!("Failed to list sessions: {}", err).red());
                            }
                        },
                        "/load" => {
                            if argument.is_empty() {
                                println!("{}", "Usage: /load <storage-key>".yellow());
                                continue;
                            }
                            let mode = controller.session().mode;
                            match SessionController::resume(
                                argument,
                                mode,
                                repository.clone(),
                                generator.clone(),
                                orders.clone(),
                            )
                            .await
                            {
                                Ok(resumed) => {
                                    controller =
                                        resumed.with_params(generator_config.params.clone());
                                    println!(
                                        "{}",
                                        format!("Resumed session {}", controller.session().id)
                                            .bright_black()
                                    );
                                    for message in &controller.session().messages {
                                        println!(
                                            "{}",
                                            format!("{}: {}", message.sender, message.content)
                                                .bright_black()
                                        );
                                    }
                                }
                                Err(err) => {
                                    eprintln!(
                                        "{}",
                                        format!("Failed to load session: {}", err).red()
                                    );
                                }
                            }
                        }
                        _ => {
                            println!("{}", "Unknown command".bright_black());
                        }
                    }
                    continue;
                }

                // One turn, start to finish, before the next prompt.
                match controller.handle_turn(&line).await {
                    Ok(TurnOutcome::Reply(message)) => {
                        for line in message.content.lines() {
                            println!("{}", format!("Bot: {}", line).bright_blue());
                        }
                    }
                    Ok(TurnOutcome::GenerationFailed) => {
                        println!("{}", format!("Bot: {}", GENERATION_FAILURE_REPLY).red());
                    }
                    Ok(TurnOutcome::Ignored) => {}
                    Err(err) => {
                        eprintln!("{}", format!("Turn failed: {}", err).red());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
