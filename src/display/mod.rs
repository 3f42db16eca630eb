//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, balances and settlements
//! for terminal display.

pub mod expense;
pub mod summary;

pub use expense::{format_expense_details, format_expense_list};
pub use summary::{
    format_dashboard, format_member_list, format_settlement_plan, ALREADY_SETTLED,
};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
