//! Expense repository for JSON storage
//!
//! Manages loading and saving the expense log to `expenses.json`. The log is
//! kept in insertion order; that order is what gets written back.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::DutchError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{quarantine, read_json, write_json_atomic};

/// Serializable expense log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// On-disk shapes accepted when loading: the wrapped form this crate writes,
/// or a bare array of expense records
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpenseFile {
    Wrapped(ExpenseData),
    Bare(Vec<Expense>),
}

impl Default for ExpenseFile {
    fn default() -> Self {
        Self::Wrapped(ExpenseData::default())
    }
}

impl From<ExpenseFile> for Vec<Expense> {
    fn from(file: ExpenseFile) -> Self {
        match file {
            ExpenseFile::Wrapped(data) => data.expenses,
            ExpenseFile::Bare(expenses) => expenses,
        }
    }
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load the log from disk
    ///
    /// An unparsable file is moved aside and the log starts empty; only
    /// failures to reach the file at all are returned as errors.
    pub fn load(&self) -> Result<(), DutchError> {
        let mut expenses: Vec<Expense> = match read_json::<ExpenseFile, _>(&self.path) {
            Ok(file) => file.into(),
            Err(DutchError::Json(reason)) => {
                tracing::warn!(%reason, "expense log is malformed, starting with an empty log");
                match quarantine(&self.path) {
                    Ok(moved) => tracing::warn!(path = %moved.display(), "kept malformed log"),
                    Err(e) => tracing::warn!(error = %e, "could not move malformed log aside"),
                }
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for expense in &mut expenses {
            expense.normalize();
        }

        tracing::debug!(count = expenses.len(), path = %self.path.display(), "loaded expenses");

        let mut data = self
            .data
            .write()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = expenses;

        Ok(())
    }

    /// Save the log to disk
    pub fn save(&self) -> Result<(), DutchError> {
        let data = self
            .data
            .read()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ExpenseData {
            expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)?;

        tracing::debug!(count = data.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, DutchError> {
        let data = self
            .data
            .read()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Resolve a user-supplied reference (full UUID, `exp-xxxxxxxx`, or a
    /// UUID prefix) to exactly one expense
    pub fn find(&self, reference: &str) -> Result<Expense, DutchError> {
        let data = self
            .data
            .read()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = data.iter().filter(|e| e.id.matches(reference));
        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense.clone()),
            (Some(_), Some(_)) => Err(DutchError::Ambiguous {
                entity_type: "Expense",
                identifier: reference.to_string(),
            }),
            (None, _) => Err(DutchError::expense_not_found(reference)),
        }
    }

    /// Append an expense to the log
    pub fn insert(&self, expense: Expense) -> Result<(), DutchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.iter().any(|e| e.id == expense.id) {
            return Err(DutchError::Storage(format!(
                "Expense {} is already in the log",
                expense.id
            )));
        }

        data.push(expense);
        Ok(())
    }

    /// Remove an expense, returning it if it was present
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Expense>, DutchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data
            .iter()
            .position(|e| e.id == id)
            .map(|index| data.remove(index)))
    }

    /// Number of logged expenses
    pub fn count(&self) -> Result<usize, DutchError> {
        let data = self
            .data
            .read()
            .map_err(|e| DutchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
