//! Expense service
//!
//! The form boundary of the application: validates new expenses before they
//! reach the log, persists every mutation, and recomputes balances and the
//! settlement plan from scratch whenever asked.

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::error::{DutchError, DutchResult};
use crate::models::{Expense, Member, MemberId, Money, Settlement};
use crate::storage::Storage;

use super::balance::{compute_balances_with, ideal_share, total_expenses, SplitMode};
use super::settlement::plan_settlements;

/// Column to order the expense list by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Description,
    PaidBy,
}

/// Ordering of the expense list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSort {
    pub field: SortField,
    pub ascending: bool,
}

impl Default for ExpenseSort {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::Date,
            ascending: false,
        }
    }
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    /// Members sharing the cost; empty means everyone
    pub shared_by: Vec<MemberId>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
}

/// Everything derived from the log at one point in time
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub expenses: Vec<Expense>,
    pub members: Vec<Member>,
    pub settlements: Vec<Settlement>,
    pub total: Money,
    pub ideal_share: Money,
    pub split_mode: SplitMode,
}

impl LedgerSnapshot {
    /// Derive balances and the settlement plan for a log
    pub fn build(expenses: Vec<Expense>, split_mode: SplitMode) -> DutchResult<Self> {
        let members = compute_balances_with(&expenses, &MemberId::ALL, split_mode)?;
        let settlements = plan_settlements(&members);

        Ok(Self {
            total: total_expenses(&expenses)?,
            ideal_share: ideal_share(&expenses, members.len())?,
            expenses,
            members,
            settlements,
            split_mode,
        })
    }

    /// True when nobody owes anybody
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    split_mode: SplitMode,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, split_mode: SplitMode) -> Self {
        Self {
            storage,
            split_mode,
        }
    }

    /// Validate and record a new expense
    pub fn add(&self, input: CreateExpenseInput) -> DutchResult<Expense> {
        let mut expense = Expense::new(input.description.trim(), input.amount, input.paid_by)
            .shared_by(input.shared_by);

        if let Some(date) = input.date {
            expense.date = date;
        }

        expense
            .validate()
            .map_err(|e| DutchError::Validation(e.to_string()))?;

        self.storage.expenses.insert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(
            id = %expense.id,
            amount = %expense.amount,
            paid_by = expense.paid_by.code(),
            "expense added"
        );

        Ok(expense)
    }

    /// Delete an expense by full or short ID
    pub fn delete(&self, reference: &str) -> DutchResult<Expense> {
        let expense = self.storage.expenses.find(reference)?;

        self.storage
            .expenses
            .remove(expense.id)?
            .ok_or_else(|| DutchError::expense_not_found(reference))?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense deleted");

        Ok(expense)
    }

    /// List expenses in the requested order
    pub fn list(&self, sort: ExpenseSort) -> DutchResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        sort_expenses(&mut expenses, sort);
        Ok(expenses)
    }

    /// Current balances for every member, in canonical order
    pub fn balances(&self) -> DutchResult<Vec<Member>> {
        let expenses = self.storage.expenses.get_all()?;
        compute_balances_with(&expenses, &MemberId::ALL, self.split_mode)
    }

    /// Current settlement plan
    pub fn settlements(&self) -> DutchResult<Vec<Settlement>> {
        Ok(plan_settlements(&self.balances()?))
    }

    /// Recompute everything derived from the current log
    pub fn snapshot(&self) -> DutchResult<LedgerSnapshot> {
        LedgerSnapshot::build(self.storage.expenses.get_all()?, self.split_mode)
    }
}

/// Order expenses in place; ties keep log order
pub fn sort_expenses(expenses: &mut [Expense], sort: ExpenseSort) {
    expenses.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            SortField::PaidBy => a.paid_by.code().cmp(b.paid_by.code()),
        };
        if sort.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DutchPaths;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DutchPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(description: &str, minor: i64, paid_by: MemberId) -> CreateExpenseInput {
        CreateExpenseInput {
            description: description.to_string(),
            amount: Money::from_minor(minor),
            paid_by,
            shared_by: Vec::new(),
            date: None,
        }
    }

    #[test]
    fn test_add_persists_and_defaults_sharers() {
        let (temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, SplitMode::Equal);

        let expense = service
            .add(input("  Groceries ", 40000, MemberId::Imthiaz))
            .unwrap();
        assert_eq!(expense.description, "Groceries");
        assert_eq!(expense.shared_by, MemberId::ALL.to_vec());
        assert!(temp_dir.path().join("data").join("expenses.json").exists());
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, SplitMode::Equal);

        let err = service.add(input("Refund", -100, MemberId::Feroza)).unwrap_err();
        assert!(err.is_validation());

        let err = service.add(input("", 100, MemberId::Feroza)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, SplitMode::Equal);

        let expense = service.add(input("Fuel", 2500, MemberId::Fouzya)).unwrap();
        let deleted = service.delete(&expense.id.to_string()).unwrap();

        assert_eq!(deleted.id, expense.id);
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(service.delete(&expense.id.to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_snapshot_single_payer() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, SplitMode::Equal);
        service.add(input("Rent", 40000, MemberId::Imthiaz)).unwrap();

        let snapshot = service.snapshot().unwrap();
        assert_eq!(snapshot.total, Money::from_minor(40000));
        assert_eq!(snapshot.ideal_share, Money::from_minor(10000));
        assert_eq!(snapshot.settlements.len(), 3);
        assert!(snapshot
            .settlements
            .iter()
            .all(|s| s.to == MemberId::Imthiaz && s.amount == Money::from_minor(10000)));
    }

    #[test]
    fn test_snapshot_already_settled() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, SplitMode::Equal);
        for id in MemberId::ALL {
            service.add(input("Turn", 10000, id)).unwrap();
        }

        let snapshot = service.snapshot().unwrap();
        assert!(snapshot.is_settled());
        assert!(snapshot.members.iter().all(|m| m.balance.is_zero()));
    }

    #[test]
    fn test_split_mode_changes_plan() {
        let (_temp_dir, storage) = create_test_storage();
        let mut shared = input("Cinema", 20000, MemberId::Imthiaz);
        shared.shared_by = vec![MemberId::Imthiaz, MemberId::Ayesha];
        ExpenseService::new(&storage, SplitMode::Equal)
            .add(shared)
            .unwrap();

        let equal = ExpenseService::new(&storage, SplitMode::Equal)
            .settlements()
            .unwrap();
        let shared_by = ExpenseService::new(&storage, SplitMode::SharedBy)
            .settlements()
            .unwrap();

        assert_eq!(equal.len(), 3);
        assert_eq!(
            shared_by,
            vec![Settlement::new(
                MemberId::Ayesha,
                MemberId::Imthiaz,
                Money::from_minor(10000)
            )]
        );
    }

    #[test]
    fn test_sort_expenses() {
        let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        let mut expenses = vec![
            Expense::new("banana", Money::from_minor(300), MemberId::Fouzya).dated(day(2)),
            Expense::new("Apple", Money::from_minor(100), MemberId::Ayesha).dated(day(3)),
            Expense::new("cherry", Money::from_minor(200), MemberId::Imthiaz).dated(day(1)),
        ];

        sort_expenses(&mut expenses, ExpenseSort::default());
        let names: Vec<_> = expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);

        sort_expenses(
            &mut expenses,
            ExpenseSort {
                field: SortField::Amount,
                ascending: true,
            },
        );
        let amounts: Vec<_> = expenses.iter().map(|e| e.amount.minor()).collect();
        assert_eq!(amounts, vec![100, 200, 300]);

        sort_expenses(
            &mut expenses,
            ExpenseSort {
                field: SortField::PaidBy,
                ascending: true,
            },
        );
        let payers: Vec<_> = expenses.iter().map(|e| e.paid_by.code()).collect();
        assert_eq!(payers, vec!["Ay", "Fo", "Im"]);

        sort_expenses(
            &mut expenses,
            ExpenseSort {
                field: SortField::Description,
                ascending: false,
            },
        );
        let names: Vec<_> = expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["cherry", "banana", "Apple"]);
    }
}
