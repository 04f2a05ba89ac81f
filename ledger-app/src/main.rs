//! # Ledger
//!
//! Binary that wires together all the components:
//! - Load configuration from environment and command line
//! - Initialize the storage adapter
//! - Run a one-shot command or the interactive terminal session

mod config;
mod session;
mod terminal;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_hex::{DeleteOutcome, IncomeExpenseViewer, TransactionManager};
use ledger_repo::build_record_store;
use ledger_types::{ConfirmationPrompt, MonthFilter, Prompt, RecordForm, RecordId, RecordType};

use crate::session::Session;
use crate::terminal::{AutoConfirm, Console, render_record_list, render_report};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author, version, about = "Personal income and expense ledger", long_about = None)]
struct Cli {
    /// Storage URL: `memory:`, `file://<dir>` or `sqlite://<path>`
    #[arg(long, global = true)]
    storage: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal session (default)
    Shell,
    /// List all transactions, newest first
    List,
    /// Record a new transaction
    Add {
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        record_type: RecordType,
        #[arg(long)]
        category: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change fields of an existing transaction
    Edit {
        /// Transaction id
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "type")]
        record_type: Option<RecordType>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Monthly income/expense summary
    Summary {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Remove every stored transaction
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,ledger_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn stdin_console() -> Arc<Console<BufReader<tokio::io::Stdin>>> {
    Arc::new(Console::new(BufReader::new(tokio::io::stdin())))
}

fn prompt_for(yes: bool) -> Arc<dyn ConfirmationPrompt> {
    if yes {
        Arc::new(AutoConfirm)
    } else {
        stdin_console()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let mut config = config::Config::from_env()?;
    if let Some(storage) = cli.storage {
        config.storage_url = storage;
    }

    tracing::debug!("Using storage: {}", config.storage_url);
    let store = Arc::new(build_record_store(&config.storage_url).await?);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut session = Session::new(stdin_console(), store, config.default_period);
            session.run().await;
        }

        Commands::List => {
            let manager = TransactionManager::open(store, AutoConfirm).await;
            let records = manager.list();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", render_record_list(&records));
            }
        }

        Commands::Add {
            date,
            record_type,
            category,
            amount,
            description,
        } => {
            let mut form = RecordForm::new(chrono::Local::now().date_naive());
            if let Some(date) = date {
                form.date = date;
            }
            form.record_type = record_type;
            form.category = category;
            form.amount = amount;
            form.description = description;

            let mut manager = TransactionManager::open(store, AutoConfirm).await;
            let record = manager.create(form).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Edit {
            id,
            date,
            record_type,
            category,
            amount,
            description,
        } => {
            let id = RecordId::from(id);
            let mut manager = TransactionManager::open(store, AutoConfirm).await;
            let Some(existing) = manager.get(&id) else {
                eprintln!("No transaction with id {id}");
                return Ok(());
            };

            let mut form = RecordForm::from_record(existing);
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(record_type) = record_type {
                form.record_type = record_type;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(description) = description {
                form.description = description;
            }

            if let Some(record) = manager.update(&id, form).await? {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }

        Commands::Delete { id, yes } => {
            let id = RecordId::from(id);
            let mut manager = TransactionManager::open(store, prompt_for(yes)).await;
            match manager.delete(&id).await {
                DeleteOutcome::Deleted => println!("✓ Transaction deleted"),
                DeleteOutcome::Cancelled => println!("Nothing deleted"),
                DeleteOutcome::NotFound => eprintln!("No transaction with id {id}"),
                DeleteOutcome::Failed => eprintln!("Could not delete transaction {id}"),
            }
        }

        Commands::Summary { year, month } => {
            let default = config.default_period;
            let filter = MonthFilter::new(
                year.unwrap_or(default.year),
                month.unwrap_or(default.month),
            )?;
            let viewer = IncomeExpenseViewer::open(store, AutoConfirm, filter).await;
            let report = viewer.report();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report, None));
            }
        }

        Commands::Reset { yes } => {
            let prompt = prompt_for(yes);
            let question = Prompt {
                title: "Reset ledger".to_string(),
                message: "Delete every stored transaction?".to_string(),
                ..Prompt::delete_record()
            };
            if !prompt.confirm(&question).await {
                println!("Nothing deleted");
                return Ok(());
            }

            let mut manager = TransactionManager::new(store, AutoConfirm);
            manager.reset().await?;
            println!("✓ Ledger cleared");
        }
    }

    Ok(())
}
