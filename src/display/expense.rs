//! Expense display formatting
//!
//! Formats the expense log as a table and single expenses as a detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Expense, MemberId};

use super::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid By")]
    paid_by: &'static str,
    #[tabled(rename = "Shared By")]
    shared_by: String,
}

/// Short form of the sharer list: "All" or the two-letter codes
fn format_sharers(shared_by: &[MemberId]) -> String {
    if shared_by.len() == MemberId::ALL.len() {
        "All".to_string()
    } else {
        shared_by
            .iter()
            .map(MemberId::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Format the expense log as a table
pub fn format_expense_list(expenses: &[Expense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format("%Y-%m-%d").to_string(),
        description: truncate(&e.description, 32),
        amount: e.amount.format_with_symbol(currency),
        paid_by: e.paid_by.name(),
        shared_by: format_sharers(&e.shared_by),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n{} expense(s)\n", table, expenses.len())
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Paid by:     {}\n", expense.paid_by));
    output.push_str(&format!(
        "Shared by:   {} ({} each)\n",
        format_sharers(&expense.shared_by),
        expense.amount_per_person().format_with_symbol(currency)
    ));

    output
}
