//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod expense;
pub mod settle;

pub use export::{handle_export_command, ExportArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use settle::{handle_ledger_command, LedgerCommands};
