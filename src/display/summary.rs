//! Balance and settlement display formatting
//!
//! The dashboard, the member roster, and the settlement plan.

use crate::models::{Member, MemberId, MemberStatus, Settlement};
use crate::services::{LedgerSnapshot, SplitMode};

use super::separator;

/// Shown in place of the settlement plan when nobody owes anything
pub const ALREADY_SETTLED: &str = "All expenses are already settled!";

fn status_text(member: &Member, currency: &str) -> String {
    let amount = member.balance.abs().format_with_symbol(currency);
    match member.status() {
        MemberStatus::IsOwed => format!("is owed {}", amount),
        MemberStatus::Owes => format!("owes {}", amount),
        MemberStatus::Settled => "settled".to_string(),
    }
}

/// Format the balance dashboard: totals and one line per member
pub fn format_dashboard(snapshot: &LedgerSnapshot, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total expenses:  {}\n",
        snapshot.total.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Per person:      {}\n",
        snapshot.ideal_share.format_with_symbol(currency)
    ));
    output.push_str(&format!("Expenses logged: {}\n", snapshot.expenses.len()));
    if snapshot.split_mode == SplitMode::SharedBy {
        output.push_str("Split mode:      shared-by (per-person shares vary)\n");
    }
    output.push('\n');

    output.push_str(&format!(
        "{:<10}  {:>14}  {:>14}  {}\n",
        "Member", "Contributed", "Balance", "Status"
    ));
    output.push_str(&separator(58));
    output.push('\n');

    for member in &snapshot.members {
        output.push_str(&format!(
            "{:<10}  {:>14}  {:>14}  {}\n",
            member.name,
            member.total_contributed.format_with_symbol(currency),
            member.balance.format_with_symbol(currency),
            status_text(member, currency),
        ));
    }

    output
}

/// Format the settlement plan as numbered payment instructions
pub fn format_settlement_plan(settlements: &[Settlement], currency: &str) -> String {
    if settlements.is_empty() {
        return format!("{}\n", ALREADY_SETTLED);
    }

    let mut output = String::new();
    output.push_str(&format!("Settlement plan ({} payments)\n", settlements.len()));
    output.push_str(&separator(40));
    output.push('\n');

    for (i, settlement) in settlements.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {:<8} → {:<8} {:>12}\n",
            i + 1,
            settlement.from.name(),
            settlement.to.name(),
            settlement.amount.format_with_symbol(currency),
        ));
    }

    output
}

/// Format the fixed member roster
pub fn format_member_list() -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<4}  {}\n", "ID", "Name"));
    for id in MemberId::ALL {
        output.push_str(&format!("{:<4}  {}\n", id.code(), id.name()));
    }
    output
}
