//! Service layer for Go Dutch
//!
//! `balance` and `settlement` hold the two pure core functions. `expense`
//! sits on top of storage: it validates input, persists mutations, and calls
//! back into the core to recompute derived state.

pub mod balance;
pub mod expense;
pub mod settlement;

pub use balance::{
    compute_balances, compute_balances_with, ideal_share, total_expenses, SplitMode,
};
pub use expense::{
    sort_expenses, CreateExpenseInput, ExpenseService, ExpenseSort, LedgerSnapshot, SortField,
};
pub use settlement::{plan_settlements, SETTLEMENT_EPSILON};
