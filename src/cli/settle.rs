//! Balance and settlement CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::summary::{format_dashboard, format_member_list, format_settlement_plan};
use crate::error::DutchResult;
use crate::services::{ExpenseService, SplitMode};
use crate::storage::Storage;

/// Read-only views derived from the log
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show totals and each member's balance
    #[command(alias = "dashboard")]
    Summary,
    /// Show who pays whom to settle all debts
    Settle,
    /// List family members
    Members,
}

/// Handle a ledger command
pub fn handle_ledger_command(
    storage: &Storage,
    settings: &Settings,
    split_mode: SplitMode,
    cmd: LedgerCommands,
) -> DutchResult<()> {
    let service = ExpenseService::new(storage, split_mode);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        LedgerCommands::Summary => {
            let snapshot = service.snapshot()?;
            print!("{}", format_dashboard(&snapshot, currency));
        }
        LedgerCommands::Settle => {
            let settlements = service.settlements()?;
            print!("{}", format_settlement_plan(&settlements, currency));
        }
        LedgerCommands::Members => {
            print!("{}", format_member_list());
        }
    }

    Ok(())
}
