//! Expense tracker main entry point
//!
//! `serve` (the default) runs the HTTP service; the other subcommands drive
//! the client state manager against a running service.

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use expense_api::start_server;
use expense_client::render::render_board;
use expense_client::{BoardState, ExpenseBoard, ExpenseForm, FormMessage, HttpExpenseApi, Severity};
use expense_config::{Config, ConfigError, ConfigResult};
use expense_core::ExpenseService;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(version = "0.1.0")]
#[command(about = "A headless, API-first expense tracking microservice", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Show all expenses
    List,
    /// Record a new expense
    Add {
        description: String,
        amount: String,
        category: String,
        /// Owner of the expense (defaults to client.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete an expense by id
    Delete { id: String },
    /// Change fields of an existing expense
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
}

/// Read the config file if present; a missing file means defaults
fn load_config(path: &Path, port: Option<u16>) -> ConfigResult<Config> {
    let mut config = if path.exists() {
        Config::load(path)?
    } else {
        Config::default()
    };
    config.apply_env_overrides()?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }
    Ok(config)
}

/// Config errors are reported with their code, field and suggestions
fn config_failure(path: &Path, error: ConfigError) -> anyhow::Error {
    anyhow!("Failed to load configuration from {}\n{}", path.display(), error.to_details())
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_env("RUST_LOG")
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args.config, args.port).map_err(|e| config_failure(&args.config, e))?;

    init_logging(&config.logging.level);
    if !args.config.exists() {
        warn!("Config file {} not found, using defaults", args.config.display());
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting expense tracker ({})", config.app.environment);
            start_server(config, ExpenseService::default()).await
        }
        command => run_client(&config, command).await,
    }
}

async fn run_client(config: &Config, command: Command) -> anyhow::Result<()> {
    let board = ExpenseBoard::new(Arc::new(HttpExpenseApi::from_config(config)));
    board.refresh().await;
    let mut form_message = None;

    match command {
        Command::Serve | Command::List => {}
        Command::Add { description, amount, category, user } => {
            let mut form = ExpenseForm::new(user.unwrap_or_else(|| config.client.user_id.clone()));
            form.set_field("description", description);
            form.set_field("amount", amount);
            form.set_field("category", category);

            board.submit(&mut form).await;
            if let Some(message) = &form.message {
                println!("{}", message.text);
            }
            form_message = form.message;
        }
        Command::Delete { id } => {
            board.delete(&id).await;
        }
        Command::Edit { id, description, amount, category } => {
            let Some(expense) = board.expenses().await.into_iter().find(|e| e.id == id) else {
                bail!("Expense with ID {} not found.", id);
            };
            board.open_edit(&expense).await;
            for (name, value) in [("description", description), ("amount", amount), ("category", category)] {
                if let Some(value) = value {
                    board.edit_field(name, value).await;
                }
            }
            board.save_edit().await;
        }
    }

    let state = board.snapshot().await;
    println!("{}", render_board(&state));
    if !succeeded(&state, form_message.as_ref()) {
        bail!("Request to {} failed", config.client.base_url);
    }
    Ok(())
}

/// A client command succeeds when the board holds no error, alert or unsaved
/// edit, and the add form (if used) did not end with a warning or error
fn succeeded(state: &BoardState, form_message: Option<&FormMessage>) -> bool {
    let form_ok = form_message.map_or(true, |m| m.severity == Severity::Success);
    form_ok && state.error.is_none() && state.alert.is_none() && state.editing.is_none()
}
