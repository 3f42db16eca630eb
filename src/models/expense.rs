//! Expense model
//!
//! An expense records who paid, how much, and which members share the cost.
//! Records are immutable once logged; editing means delete and re-add.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::member::MemberId;
use super::money::{self, Money, MAX_AMOUNT};

/// A shared family expense
///
/// Serialized with the field names of the persisted log:
/// `{id, date, description, amount, paidBy, sharedBy}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// When the expense happened (ISO-8601)
    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,

    /// What the money was spent on
    pub description: String,

    /// Amount paid, stored as a number of major units in the log
    #[serde(with = "money::major_units")]
    pub amount: Money,

    /// Member who paid
    pub paid_by: MemberId,

    /// Members who share the cost. Empty means everyone.
    #[serde(default)]
    pub shared_by: Vec<MemberId>,
}

impl Expense {
    /// Create a new expense dated now, shared by everyone
    pub fn new(description: impl Into<String>, amount: Money, paid_by: MemberId) -> Self {
        Self {
            id: ExpenseId::new(),
            date: Utc::now(),
            description: description.into(),
            amount,
            paid_by,
            shared_by: MemberId::ALL.to_vec(),
        }
    }

    /// Set the members sharing this expense; an empty list means everyone
    pub fn shared_by(mut self, members: impl IntoIterator<Item = MemberId>) -> Self {
        self.shared_by = members.into_iter().collect();
        self.normalize();
        self
    }

    /// Set the expense date
    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Restore the `shared_by` invariant: non-empty, no duplicates,
    /// canonical member order
    pub fn normalize(&mut self) {
        if self.shared_by.is_empty() {
            self.shared_by = MemberId::ALL.to_vec();
        }
        self.shared_by.sort_by_key(MemberId::index);
        self.shared_by.dedup();
    }

    /// Amount each sharing member carries, rounded to the minor unit
    pub fn amount_per_person(&self) -> Money {
        let sharers = self.shared_by.len().max(1) as i64;
        self.amount.div_round(sharers)
    }

    /// Validate the expense as entered
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.shared_by.is_empty() {
            return Err(ExpenseValidationError::NoSharers);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} paid by {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.paid_by
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    NoSharers,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be at most {}, got {}", MAX_AMOUNT, amount)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NoSharers => write!(f, "An expense must be shared by at least one member"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Serde adapter for expense dates
///
/// Writes RFC 3339 with millisecond precision. Reads any RFC 3339 timestamp
/// and also bare `YYYY-MM-DD` dates, taken as midnight UTC.
pub mod iso_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }

    /// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_expense_shared_by_everyone() {
        let expense = Expense::new("Groceries", Money::from_minor(40000), MemberId::Imthiaz);
        assert_eq!(expense.shared_by, MemberId::ALL.to_vec());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_shared_by_normalizes() {
        let expense = Expense::new("Taxi", Money::from_minor(900), MemberId::Feroza).shared_by([
            MemberId::Ayesha,
            MemberId::Feroza,
            MemberId::Ayesha,
        ]);
        assert_eq!(expense.shared_by, vec![MemberId::Feroza, MemberId::Ayesha]);

        let everyone = Expense::new("Rent", Money::from_minor(900), MemberId::Feroza).shared_by(Vec::<MemberId>::new());
        assert_eq!(everyone.shared_by, MemberId::ALL.to_vec());
    }

    #[test]
    fn test_amount_per_person() {
        let expense = Expense::new("Dinner", Money::from_minor(10000), MemberId::Fouzya)
            .shared_by([MemberId::Imthiaz, MemberId::Feroza, MemberId::Fouzya]);
        assert_eq!(expense.amount_per_person(), Money::from_minor(3333));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let zero = Expense::new("Nothing", Money::zero(), MemberId::Imthiaz);
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        let blank = Expense::new("   ", Money::from_minor(100), MemberId::Imthiaz);
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyDescription));

        let huge = Money::from_major_f64(5.0e16).unwrap();
        let oversized = Expense::new("Yacht", huge, MemberId::Imthiaz);
        assert_eq!(
            oversized.validate(),
            Err(ExpenseValidationError::AmountTooLarge(huge))
        );

        let at_cap = Expense::new("House", MAX_AMOUNT, MemberId::Imthiaz);
        assert_eq!(at_cap.validate(), Ok(()));
    }

    #[test]
    fn test_deserialize_log_record() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2024-05-01T10:30:00.000Z",
            "description": "Electricity",
            "amount": 1234.5,
            "paidBy": "Fo",
            "sharedBy": ["Im", "Fo"]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Money::from_minor(123450));
        assert_eq!(expense.paid_by, MemberId::Fouzya);
        assert_eq!(expense.shared_by, vec![MemberId::Imthiaz, MemberId::Fouzya]);
        assert_eq!(
            expense.date,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_serialize_uses_log_field_names() {
        let expense = Expense::new("Milk", Money::from_minor(5000), MemberId::Ayesha)
            .dated(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let value = serde_json::to_value(&expense).unwrap();

        assert_eq!(value["paidBy"], "Ay");
        assert_eq!(value["amount"], 50.0);
        assert_eq!(value["date"], "2024-01-02T03:04:05.000Z");
        assert_eq!(value["sharedBy"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_date_only_is_accepted() {
        let parsed = iso_date::parse("2024-03-15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert!(iso_date::parse("15/03/2024").is_none());
    }
}
