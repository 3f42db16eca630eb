//! Report sheets
//!
//! A report is four named sheets of rows, built from a [`LedgerSnapshot`].
//! The writers in `csv`, `json` and `yaml` only decide how those sheets
//! land on disk; every number and label is fixed here.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::money::div_round_half_away;
use crate::models::{Expense, Member, MemberId, Money};
use crate::services::{LedgerSnapshot, SplitMode};

pub const EXPENSES_SHEET: &str = "Expenses";
pub const MEMBER_SUMMARY_SHEET: &str = "Member Summary";
pub const SETTLEMENT_PLAN_SHEET: &str = "Settlement Plan";
pub const STATISTICS_SHEET: &str = "Statistics";

/// Text of the placeholder settlement sheet when nobody owes anything
pub const SETTLED_MESSAGE: &str = "All expenses are settled! No transactions needed.";

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// A single sheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Count(u64),
    Amount(f64),
    Text(String),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn amount(value: Money) -> Self {
        Self::Amount(value.to_major_f64())
    }

    /// Cell as it appears in a CSV file
    pub fn render(&self) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Amount(v) => format!("{:.2}", v),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A named table with a header row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Look up a cell by row index and header name
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let column = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(column)
    }
}

/// The full multi-sheet report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub app_version: String,
    pub split_mode: SplitMode,
    pub sheets: Vec<Sheet>,
}

impl Report {
    /// Build the report sheets for a snapshot
    ///
    /// `date_format` is a strftime pattern for the Expenses sheet; an invalid
    /// pattern falls back to day/month/year.
    pub fn build(snapshot: &LedgerSnapshot, date_format: &str) -> Self {
        let date_format = if is_valid_format(date_format) {
            date_format
        } else {
            tracing::warn!(date_format, "invalid report date format, using default");
            FALLBACK_DATE_FORMAT
        };

        Self {
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            split_mode: snapshot.split_mode,
            sheets: vec![
                expenses_sheet(&snapshot.expenses, date_format),
                member_summary_sheet(snapshot),
                settlement_plan_sheet(snapshot),
                statistics_sheet(&snapshot.expenses, &snapshot.members, snapshot.total),
            ],
        }
    }

    /// Find a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn member_names(members: &[MemberId]) -> String {
    members
        .iter()
        .map(MemberId::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn expenses_sheet(expenses: &[Expense], date_format: &str) -> Sheet {
    let mut sheet = Sheet::new(
        EXPENSES_SHEET,
        &[
            "Date",
            "Description",
            "Amount",
            "Paid By",
            "Shared By",
            "Amount Per Person",
        ],
    );

    for expense in expenses {
        sheet.rows.push(vec![
            Cell::text(expense.date.format(date_format).to_string()),
            Cell::text(expense.description.as_str()),
            Cell::amount(expense.amount),
            Cell::text(expense.paid_by.name()),
            Cell::text(member_names(&expense.shared_by)),
            Cell::amount(expense.amount_per_person()),
        ]);
    }

    sheet
}

fn member_summary_sheet(snapshot: &LedgerSnapshot) -> Sheet {
    let mut sheet = Sheet::new(
        MEMBER_SUMMARY_SHEET,
        &[
            "Member Name",
            "Total Contributed",
            "Ideal Share",
            "Balance",
            "Status",
            "Amount",
        ],
    );

    for member in &snapshot.members {
        let share = match snapshot.split_mode {
            SplitMode::Equal => snapshot.ideal_share,
            // each member's own portion of what they shared
            SplitMode::SharedBy => member.total_contributed - member.balance,
        };
        sheet.rows.push(vec![
            Cell::text(member.name.as_str()),
            Cell::amount(member.total_contributed),
            Cell::amount(share),
            Cell::amount(member.balance),
            Cell::text(member.status().to_string()),
            Cell::amount(member.balance.abs()),
        ]);
    }

    sheet.rows.push(vec![
        Cell::text("TOTAL"),
        Cell::amount(snapshot.total),
        Cell::amount(snapshot.total),
        Cell::amount(Money::zero()),
        Cell::text(""),
        Cell::amount(Money::zero()),
    ]);

    sheet
}

fn settlement_plan_sheet(snapshot: &LedgerSnapshot) -> Sheet {
    if snapshot.is_settled() {
        let mut sheet = Sheet::new(SETTLEMENT_PLAN_SHEET, &["Message"]);
        sheet.rows.push(vec![Cell::text(SETTLED_MESSAGE)]);
        return sheet;
    }

    let mut sheet = Sheet::new(
        SETTLEMENT_PLAN_SHEET,
        &["Transaction #", "From", "To", "Amount", "Status"],
    );

    for (number, settlement) in (1u64..).zip(&snapshot.settlements) {
        sheet.rows.push(vec![
            Cell::Count(number),
            Cell::text(settlement.from.name()),
            Cell::text(settlement.to.name()),
            Cell::amount(settlement.amount),
            Cell::text("Pending"),
        ]);
    }

    sheet
}

fn statistics_sheet(expenses: &[Expense], members: &[Member], total: Money) -> Sheet {
    let mut sheet = Sheet::new(
        STATISTICS_SHEET,
        &[
            "Member Name",
            "Expenses Paid",
            "Total Amount Paid",
            "Average Expense",
            "Percentage of Total",
        ],
    );

    for member in members {
        let paid: Vec<Money> = expenses
            .iter()
            .filter(|e| e.paid_by == member.id)
            .map(|e| e.amount)
            .collect();
        let count = paid.len() as u64;
        let sum: Money = paid.iter().sum();

        let average = if count == 0 {
            Money::zero()
        } else {
            sum.div_round(count as i64)
        };

        // Hundredths of a percent, so the cell keeps two decimals
        let percentage = if total.is_zero() {
            0.0
        } else {
            div_round_half_away(sum.minor() as i128 * 10_000, total.minor() as i128) as f64 / 100.0
        };

        sheet.rows.push(vec![
            Cell::text(member.name.as_str()),
            Cell::Count(count),
            Cell::amount(sum),
            Cell::amount(average),
            Cell::Amount(percentage),
        ]);
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(expenses: Vec<Expense>) -> LedgerSnapshot {
        LedgerSnapshot::build(expenses, SplitMode::Equal).unwrap()
    }

    fn expense(minor: i64, paid_by: MemberId) -> Expense {
        Expense::new("Groceries", Money::from_minor(minor), paid_by)
            .dated(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_sheet_order_and_headers() {
        let report = Report::build(&snapshot(vec![expense(40000, MemberId::Imthiaz)]), "%d/%m/%Y");

        let names: Vec<_> = report.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![EXPENSES_SHEET, MEMBER_SUMMARY_SHEET, SETTLEMENT_PLAN_SHEET, STATISTICS_SHEET]
        );
        assert_eq!(
            report.sheet(SETTLEMENT_PLAN_SHEET).unwrap().headers,
            vec!["Transaction #", "From", "To", "Amount", "Status"]
        );
    }

    #[test]
    fn test_expenses_sheet_rows() {
        let shared = expense(10000, MemberId::Feroza).shared_by([
            MemberId::Ayesha,
            MemberId::Feroza,
            MemberId::Imthiaz,
        ]);
        let report = Report::build(&snapshot(vec![shared]), "%d/%m/%Y");
        let sheet = report.sheet(EXPENSES_SHEET).unwrap();

        assert_eq!(sheet.cell(0, "Date"), Some(&Cell::text("01/05/2024")));
        assert_eq!(sheet.cell(0, "Paid By"), Some(&Cell::text("Feroza")));
        assert_eq!(
            sheet.cell(0, "Shared By"),
            Some(&Cell::text("Imthiaz, Feroza, Ayesha"))
        );
        assert_eq!(sheet.cell(0, "Amount Per Person"), Some(&Cell::Amount(33.33)));
    }

    #[test]
    fn test_member_summary_has_total_row() {
        let report = Report::build(&snapshot(vec![expense(40000, MemberId::Imthiaz)]), "%d/%m/%Y");
        let sheet = report.sheet(MEMBER_SUMMARY_SHEET).unwrap();

        assert_eq!(sheet.rows.len(), 5);
        assert_eq!(sheet.cell(0, "Status"), Some(&Cell::text("Is Owed")));
        assert_eq!(sheet.cell(0, "Balance"), Some(&Cell::Amount(300.0)));
        assert_eq!(sheet.cell(1, "Status"), Some(&Cell::text("Owes")));
        assert_eq!(sheet.cell(1, "Amount"), Some(&Cell::Amount(100.0)));
        assert_eq!(sheet.cell(1, "Ideal Share"), Some(&Cell::Amount(100.0)));

        assert_eq!(sheet.cell(4, "Member Name"), Some(&Cell::text("TOTAL")));
        assert_eq!(sheet.cell(4, "Total Contributed"), Some(&Cell::Amount(400.0)));
        assert_eq!(sheet.cell(4, "Status"), Some(&Cell::text("")));
    }

    #[test]
    fn test_member_summary_ideal_share_is_uniform_in_equal_mode() {
        // 0.02 over four members: balances round to +0.02 / -0.01
        let report = Report::build(&snapshot(vec![expense(2, MemberId::Imthiaz)]), "%d/%m/%Y");
        let sheet = report.sheet(MEMBER_SUMMARY_SHEET).unwrap();

        for row in 0..4 {
            assert_eq!(
                sheet.cell(row, "Ideal Share"),
                Some(&Cell::amount(Money::from_minor(1)))
            );
        }
        assert_eq!(
            sheet.cell(0, "Balance"),
            Some(&Cell::amount(Money::from_minor(2)))
        );
    }

    #[test]
    fn test_settlement_plan_rows() {
        let report = Report::build(&snapshot(vec![expense(40000, MemberId::Imthiaz)]), "%d/%m/%Y");
        let sheet = report.sheet(SETTLEMENT_PLAN_SHEET).unwrap();

        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.cell(0, "Transaction #"), Some(&Cell::Count(1)));
        assert_eq!(sheet.cell(0, "From"), Some(&Cell::text("Feroza")));
        assert_eq!(sheet.cell(2, "To"), Some(&Cell::text("Imthiaz")));
        assert_eq!(sheet.cell(2, "Status"), Some(&Cell::text("Pending")));
    }

    #[test]
    fn test_settled_log_gets_placeholder_sheet() {
        let expenses = MemberId::ALL.iter().map(|&m| expense(5000, m)).collect();
        let report = Report::build(&snapshot(expenses), "%d/%m/%Y");
        let sheet = report.sheet(SETTLEMENT_PLAN_SHEET).unwrap();

        assert_eq!(sheet.headers, vec!["Message"]);
        assert_eq!(sheet.rows, vec![vec![Cell::text(SETTLED_MESSAGE)]]);
    }

    #[test]
    fn test_statistics() {
        let report = Report::build(
            &snapshot(vec![
                expense(10000, MemberId::Imthiaz),
                expense(20000, MemberId::Imthiaz),
                expense(10000, MemberId::Ayesha),
            ]),
            "%d/%m/%Y",
        );
        let sheet = report.sheet(STATISTICS_SHEET).unwrap();

        assert_eq!(sheet.cell(0, "Expenses Paid"), Some(&Cell::Count(2)));
        assert_eq!(sheet.cell(0, "Average Expense"), Some(&Cell::Amount(150.0)));
        assert_eq!(sheet.cell(0, "Percentage of Total"), Some(&Cell::Amount(75.0)));
        assert_eq!(sheet.cell(1, "Expenses Paid"), Some(&Cell::Count(0)));
        assert_eq!(sheet.cell(1, "Average Expense"), Some(&Cell::Amount(0.0)));
    }

    #[test]
    fn test_empty_log_has_zero_percentages() {
        let report = Report::build(&snapshot(Vec::new()), "%d/%m/%Y");
        let sheet = report.sheet(STATISTICS_SHEET).unwrap();

        for row in 0..sheet.rows.len() {
            assert_eq!(sheet.cell(row, "Percentage of Total"), Some(&Cell::Amount(0.0)));
        }
        assert!(report.sheet(EXPENSES_SHEET).unwrap().rows.is_empty());
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let report = Report::build(&snapshot(vec![expense(100, MemberId::Fouzya)]), "%Q");
        let sheet = report.sheet(EXPENSES_SHEET).unwrap();
        assert_eq!(sheet.cell(0, "Date"), Some(&Cell::text("01/05/2024")));
    }

    #[test]
    fn test_render_cells() {
        assert_eq!(Cell::Amount(33.3).render(), "33.30");
        assert_eq!(Cell::Count(3).render(), "3");
        assert_eq!(Cell::text("Owes").render(), "Owes");
    }
}
