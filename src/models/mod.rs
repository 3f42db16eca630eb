//! Core data models for Go Dutch
//!
//! This module contains the data structures of the expense-sharing domain:
//! members, expenses, money, and settlements.

pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

pub use expense::{Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use member::{Member, MemberId, MemberStatus, UnknownMember};
pub use money::Money;
pub use settlement::Settlement;
