//! Settlement planner
//!
//! Greedy largest-debtor / largest-creditor matching. Each debtor, largest
//! first, pays the largest remaining creditor until the debt is cleared,
//! moving on to the next creditor whenever one is fully paid.
//!
//! The result is not guaranteed to be the theoretical minimum number of
//! transactions, but it never exceeds `members - 1` when balances sum to zero.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::models::{Member, MemberId, Money, Settlement};

/// Remaining credit below this is treated as fully settled
pub const SETTLEMENT_EPSILON: Money = Money::from_minor(1);

/// Plan the payments that bring every balance to zero
///
/// Members with a zero balance take no part. Ties in magnitude are broken by
/// canonical member order, so the plan is reproducible.
pub fn plan_settlements(members: &[Member]) -> Vec<Settlement> {
    let mut debtors: Vec<(MemberId, Money)> = members
        .iter()
        .filter(|m| m.balance.is_negative())
        .map(|m| (m.id, m.balance.abs()))
        .collect();
    debtors.sort_by(largest_first);

    let mut creditors: Vec<(MemberId, Money)> = members
        .iter()
        .filter(|m| m.balance.is_positive())
        .map(|m| (m.id, m.balance))
        .collect();
    creditors.sort_by(largest_first);
    let mut creditors: VecDeque<_> = creditors.into();

    let mut settlements = Vec::new();

    for (debtor, debt) in debtors {
        let mut remaining = debt;

        while remaining >= SETTLEMENT_EPSILON {
            let Some((creditor, credit)) = creditors.front_mut() else {
                break;
            };

            let amount = remaining.min(*credit);
            if amount.is_positive() {
                settlements.push(Settlement::new(debtor, *creditor, amount));
            }

            remaining -= amount;
            *credit -= amount;

            if *credit < SETTLEMENT_EPSILON {
                creditors.pop_front();
            }
        }
    }

    settlements
}

fn largest_first(a: &(MemberId, Money), b: &(MemberId, Money)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.index().cmp(&b.0.index()))
}
