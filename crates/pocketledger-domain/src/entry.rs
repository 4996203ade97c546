//! Domain models for recorded ledger entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded transaction: dated income or a categorized expense.
///
/// Entries are immutable once stored; the ledger removes them by id but
/// never edits them in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry {
    /// Creates an income entry with a fresh id.
    pub fn income(date: NaiveDate, amount: f64, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind: EntryKind::Income,
            amount,
            category: None,
            description: normalize_description(description),
        }
    }

    /// Creates an expense entry with a fresh id.
    pub fn expense(
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind: EntryKind::Expense,
            amount,
            category: Some(category.into()),
            description: normalize_description(description),
        }
    }

    /// Returns `true` when the entry satisfies the stored-entry invariants:
    /// positive finite amount, and a non-empty category exactly for expenses.
    pub fn is_well_formed(&self) -> bool {
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return false;
        }
        match self.kind {
            EntryKind::Income => self.category.is_none(),
            EntryKind::Expense => self
                .category
                .as_deref()
                .map(|name| !name.trim().is_empty())
                .unwrap_or(false),
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Enumerates the two sides of the ledger.
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn income_entries_carry_no_category() {
        let entry = Entry::income(date(2024, 3, 1), 1000.0, Some("salary".into()));
        assert_eq!(entry.kind, EntryKind::Income);
        assert!(entry.category.is_none());
        assert!(entry.is_well_formed());
    }

    #[test]
    fn blank_descriptions_normalize_to_none() {
        let entry = Entry::income(date(2024, 3, 1), 10.0, Some("   ".into()));
        assert!(entry.description.is_none());
    }

    #[test]
    fn expense_without_category_is_malformed() {
        let mut entry = Entry::expense(date(2024, 3, 5), 20.0, "Groceries", None);
        assert!(entry.is_well_formed());
        entry.category = None;
        assert!(!entry.is_well_formed());
    }

    #[test]
    fn serde_omits_absent_optionals() {
        let entry = Entry::income(date(2024, 3, 1), 50.0, None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("category").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["kind"], "income");

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
