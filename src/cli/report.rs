//! CLI commands for reports
//!
//! Provides commands for printing and exporting the spending and budget
//! reports of a ledger file.

use clap::Subcommand;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Budget;
use crate::reports::{BudgetOverviewReport, SpendingReport};

use super::load_ledger;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per category, largest first
    Categories {
        /// Ledger CSV file
        file: PathBuf,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending per month, oldest first
    #[command(alias = "months")]
    Monthly {
        /// Ledger CSV file
        file: PathBuf,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Total spending against the budget
    Budget {
        /// Ledger CSV file
        file: PathBuf,

        /// Budget to compare against (defaults to the configured budget)
        #[arg(short, long)]
        budget: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget overview followed by the category and monthly breakdowns
    Summary {
        /// Ledger CSV file
        file: PathBuf,

        /// Budget to compare against (defaults to the configured budget)
        #[arg(short, long)]
        budget: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(cmd: ReportCommands, settings: &Settings) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Categories { file, top, output } => {
            let report = spending_report(&file, settings)?;
            match output {
                Some(path) => write_report(&path, |w| report.export_categories_csv(w, top))?,
                None => print!("{}", report.format_categories(top, symbol)),
            }
        }
        ReportCommands::Monthly { file, output } => {
            let report = spending_report(&file, settings)?;
            match output {
                Some(path) => write_report(&path, |w| report.export_months_csv(w))?,
                None => print!("{}", report.format_months(symbol)),
            }
        }
        ReportCommands::Budget {
            file,
            budget,
            output,
        } => {
            let budget = resolve_budget(budget.as_deref(), settings);
            let ledger = load_ledger(&file, budget)?;
            let report = BudgetOverviewReport::generate(ledger.expenses(), &ledger.budget());
            match output {
                Some(path) => write_report(&path, |w| report.export_csv(w))?,
                None => print!("{}", report.format_terminal(symbol)),
            }
        }
        ReportCommands::Summary { file, budget } => {
            let budget = resolve_budget(budget.as_deref(), settings);
            let ledger = load_ledger(&file, budget)?;
            let overview = BudgetOverviewReport::generate(ledger.expenses(), &ledger.budget());
            let spending = SpendingReport::generate(ledger.expenses());

            print!("{}", overview.format_terminal(symbol));
            println!();
            print!("{}", spending.format_terminal(symbol));
        }
    }

    Ok(())
}

fn spending_report(file: &Path, settings: &Settings) -> LedgerResult<SpendingReport> {
    let ledger = load_ledger(file, settings.budget())?;
    Ok(SpendingReport::generate(ledger.expenses()))
}

/// The budget named on the command line, or the configured one if it is invalid
fn resolve_budget(arg: Option<&str>, settings: &Settings) -> Budget {
    let mut budget = settings.budget();
    if let Some(text) = arg {
        if let Err(e) = budget.set_from_str(text) {
            tracing::warn!(error = %e, fallback = %budget, "Invalid budget, using configured budget");
        }
    }
    budget
}

fn write_report<F>(path: &Path, export: F) -> LedgerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    println!("Report exported to: {}", path.display());
    Ok(())
}
