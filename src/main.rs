use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expense_ledger::cli::{
    handle_add_command, handle_delete_command, handle_export_command, handle_import_command,
    handle_list_command, handle_report_command, handle_sample_command, ExportFormat,
    ReportCommands,
};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::models::{Category, ExpenseDraft};
use expense_ledger::LedgerError;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "EXPENSE_LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Record expenses, summarize spending, and track a budget",
    long_about = "Keeps expenses in a plain CSV file. Add and list entries, \
                  import and export CSV, and report spending by category and \
                  by month against a budget."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add {
        /// Ledger CSV file (created if missing)
        file: PathBuf,
        /// What the money was spent on
        #[arg(short, long)]
        description: String,
        /// Amount, e.g. 12.50
        #[arg(short, long)]
        amount: String,
        /// Category (Food, Transport, Shopping, Bills, Entertainment, Health, Other)
        #[arg(short, long, default_value = "Food")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Rewrite the file even if it holds invalid rows, dropping them
        #[arg(long)]
        force: bool,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Ledger CSV file
        file: PathBuf,
        /// Only show this category
        #[arg(short, long)]
        category: Option<Category>,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete the expense at a row shown by `list`
    #[command(alias = "rm")]
    Delete {
        /// Ledger CSV file
        file: PathBuf,
        /// Row number from `list`
        row: usize,
        /// Rewrite the file even if it holds invalid rows, dropping them
        #[arg(long)]
        force: bool,
    },

    /// Import expenses from a CSV file into a ledger file
    Import {
        /// CSV file to read
        source: PathBuf,
        /// Ledger CSV file to add the expenses to
        #[arg(long)]
        into: PathBuf,
        /// Rewrite the ledger even if it holds invalid rows, dropping them
        #[arg(long)]
        force: bool,
    },

    /// Export a ledger file
    Export {
        /// Ledger CSV file
        file: PathBuf,
        /// Output path (defaults to the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Spending and budget reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Write a small sample data set
    Sample {
        /// Output file (prints to stdout if omitted)
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config {
        /// Save a new default budget
        #[arg(long, value_name = "AMOUNT")]
        set_budget: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Add {
            file,
            description,
            amount,
            category,
            date,
            force,
        }) => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format("%Y-%m-%d")
                    .to_string()
            });
            let draft = ExpenseDraft::new(description, amount, category, date);
            handle_add_command(&file, &draft, force, &settings)?;
        }
        Some(Commands::List {
            file,
            category,
            limit,
        }) => {
            handle_list_command(&file, category, limit, &settings)?;
        }
        Some(Commands::Delete { file, row, force }) => {
            handle_delete_command(&file, row, force, &settings)?;
        }
        Some(Commands::Import {
            source,
            into,
            force,
        }) => {
            handle_import_command(&source, &into, force, &settings)?;
        }
        Some(Commands::Export {
            file,
            output,
            format,
            pretty,
        }) => {
            handle_export_command(&file, output, format, pretty, &settings)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(cmd, &settings)?;
        }
        Some(Commands::Sample { output }) => {
            handle_sample_command(output.as_deref())?;
        }
        Some(Commands::Config { set_budget }) => {
            if let Some(amount) = set_budget {
                settings
                    .set_budget(&amount)
                    .map_err(|e| LedgerError::Config(e.to_string()))?;
                settings.save(&paths)?;
                println!("Default budget set to {}", settings.budget());
                println!();
            }

            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default budget:   {}", settings.budget());
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Export file name: {}", settings.export_file_name);
        }
        None => {
            println!("Expense Ledger - track spending against a budget");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses sample expenses.csv' to start with sample data.");
        }
    }

    Ok(())
}
