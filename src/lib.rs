//! Go Dutch - family expense sharing from the command line
//!
//! This library records shared expenses for a fixed family roster, derives
//! each member's balance against an equal share of the total, and plans a
//! short list of payments that settles every debt.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, expenses, money, settlements)
//! - `storage`: JSON file storage layer
//! - `services`: Balance calculation, settlement planning and the expense service
//! - `display`: Terminal formatting
//! - `export`: Multi-sheet report export (CSV, JSON, YAML)
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use go_dutch::models::{Expense, MemberId, Money};
//! use go_dutch::services::{compute_balances, plan_settlements};
//!
//! let log = vec![Expense::new("Groceries", Money::from_minor(40000), MemberId::Imthiaz)];
//! let members = compute_balances(&log, &MemberId::ALL).unwrap();
//! let plan = plan_settlements(&members);
//!
//! assert_eq!(plan.len(), 3);
//! assert!(plan.iter().all(|s| s.to == MemberId::Imthiaz));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DutchError, DutchResult};
