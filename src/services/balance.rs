//! Balance calculator
//!
//! Derives each member's total contribution and net balance from the expense
//! log. The calculation is a pure function of its inputs: nothing is cached,
//! and the expense slice is only read.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DutchError, DutchResult};
use crate::models::money::div_round_half_away;
use crate::models::{Expense, Member, MemberId, Money};

/// How each member's fair share of the total is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Every member owes total / member count, regardless of `shared_by`
    #[default]
    Equal,
    /// Each expense is owed only by the members listed in its `shared_by`
    SharedBy,
}

/// Sum of all expense amounts
pub fn total_expenses(expenses: &[Expense]) -> DutchResult<Money> {
    expenses
        .iter()
        .try_fold(Money::zero(), |total, e| total.checked_add(e.amount))
        .ok_or(DutchError::AmountOverflow)
}

/// Equal-split baseline: total expenses divided by the member count,
/// rounded to the minor unit
pub fn ideal_share(expenses: &[Expense], member_count: usize) -> DutchResult<Money> {
    if member_count == 0 {
        return Err(DutchError::NoMembers);
    }
    Ok(total_expenses(expenses)?.div_round(member_count as i64))
}

/// Compute member balances with the equal-split rule
///
/// Members are returned in the order given (duplicates dropped). A `paid_by`
/// outside `members` adds nothing to anyone's contribution but still counts
/// toward the total being split.
pub fn compute_balances(expenses: &[Expense], members: &[MemberId]) -> DutchResult<Vec<Member>> {
    compute_balances_with(expenses, members, SplitMode::Equal)
}

/// Compute member balances with an explicit split rule
pub fn compute_balances_with(
    expenses: &[Expense],
    members: &[MemberId],
    mode: SplitMode,
) -> DutchResult<Vec<Member>> {
    let mut roster: Vec<Member> = Vec::with_capacity(members.len());
    for id in members {
        if !roster.iter().any(|m| m.id == *id) {
            roster.push(Member::new(*id));
        }
    }

    if roster.is_empty() {
        return Err(DutchError::NoMembers);
    }

    let total = total_expenses(expenses)?;
    for expense in expenses {
        if let Some(payer) = roster.iter_mut().find(|m| m.id == expense.paid_by) {
            // bounded by `total`, which already fit
            payer.total_contributed += expense.amount;
        }
    }

    match mode {
        SplitMode::Equal => {
            let count = roster.len() as i128;
            for member in &mut roster {
                // contributed - total / n, kept exact until the single rounding step
                let scaled = member.total_contributed.minor() as i128 * count - total.minor() as i128;
                member.balance = Money::from_minor(div_round_half_away(scaled, count) as i64);
            }
        }
        SplitMode::SharedBy => {
            let ids: Vec<MemberId> = roster.iter().map(|m| m.id).collect();
            let mut owed = vec![Money::zero(); roster.len()];
            for expense in expenses {
                for (sharer, portion) in split_among_sharers(expense, &ids) {
                    if let Some(slot) = ids.iter().position(|id| *id == sharer) {
                        owed[slot] += portion;
                    }
                }
            }
            for (member, owed) in roster.iter_mut().zip(owed) {
                member.balance = member.total_contributed - owed;
            }
        }
    }

    Ok(roster)
}

/// Split one expense across its sharers in whole minor units
///
/// Leftover minor units go one each to the earliest sharers in canonical
/// member order, so the portions always add up to the expense amount.
fn split_among_sharers(expense: &Expense, roster: &[MemberId]) -> Vec<(MemberId, Money)> {
    let mut sharers: Vec<MemberId> = if expense.shared_by.is_empty() {
        roster.to_vec()
    } else {
        expense.shared_by.clone()
    };
    sharers.sort_by_key(MemberId::index);
    sharers.dedup();

    if sharers.is_empty() {
        return Vec::new();
    }

    let count = sharers.len() as i64;
    let base = expense.amount.minor() / count;
    let leftover = expense.amount.minor() % count;

    sharers
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let extra = if (i as i64) < leftover { 1 } else { 0 };
            (id, Money::from_minor(base + extra))
        })
        .collect()
}
