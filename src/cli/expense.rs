//! Expense CLI commands
//!
//! Implements the commands that read and change the expense log.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{DutchError, DutchResult};
use crate::models::expense::iso_date;
use crate::models::{MemberId, Money};
use crate::services::{CreateExpenseInput, ExpenseService, ExpenseSort, SortField, SplitMode};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount paid (e.g., "450.50" or "₹450.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What the money was spent on
        description: String,
        /// Member who paid (Im, Fe, Fo, Ay or full name)
        #[arg(short, long)]
        paid_by: MemberId,
        /// Comma-separated members sharing the cost (default: everyone)
        #[arg(short, long)]
        shared_by: Option<String>,
        /// Expense date (YYYY-MM-DD, default: now)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full UUID or the short exp-xxxxxxxx form)
        id: String,
    },
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Column to sort by
        #[arg(short, long, value_enum, default_value_t = SortField::Date)]
        sort: SortField,
        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    split_mode: SplitMode,
    cmd: ExpenseCommands,
) -> DutchResult<()> {
    let service = ExpenseService::new(storage, split_mode);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            paid_by,
            shared_by,
            date,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                DutchError::Validation(format!(
                    "Invalid amount '{}'. Use a format like '450.50'. Error: {}",
                    amount, e
                ))
            })?;

            let shared_by = match shared_by {
                Some(list) => MemberId::parse_list(&list)
                    .map_err(|e| DutchError::Validation(e.to_string()))?,
                None => Vec::new(),
            };

            let date = date
                .map(|raw| {
                    iso_date::parse(&raw).ok_or_else(|| {
                        DutchError::Validation(format!(
                            "Invalid date '{}'. Use YYYY-MM-DD.",
                            raw
                        ))
                    })
                })
                .transpose()?;

            let expense = service.add(CreateExpenseInput {
                description,
                amount,
                paid_by,
                shared_by,
                date,
            })?;

            println!("Added expense {}", expense.id);
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!(
                "Deleted expense {}: {} ({})",
                expense.id,
                expense.description,
                expense.amount.format_with_symbol(currency)
            );
        }

        ExpenseCommands::List { sort, asc } => {
            let expenses = service.list(ExpenseSort {
                field: sort,
                ascending: asc,
            })?;
            print!("{}", format_expense_list(&expenses, currency));
        }
    }

    Ok(())
}
