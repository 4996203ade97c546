//! Aggregation over entry collections: daily and overall totals, and
//! per-category monthly spend.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use pocketledger_domain::{Entry, EntryKind, MonthRef};

/// Income/expense/balance totals for one aggregation scope.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Stateless aggregation utilities over ledger snapshots.
///
/// These are pure computations over already-validated entries; they raise no
/// errors and do not re-check invariants the store enforces.
pub struct SummaryService;

impl SummaryService {
    /// Totals for entries dated exactly `date`. An empty match is all zeros.
    pub fn daily(entries: &[Entry], date: NaiveDate) -> Totals {
        Self::totals_where(entries, |entry| entry.date == date)
    }

    /// Totals over the full collection.
    pub fn overall(entries: &[Entry]) -> Totals {
        Self::totals_where(entries, |_| true)
    }

    /// Expense totals per category for entries falling inside `month`.
    /// Categories with no spend in the month are absent from the result.
    pub fn monthly_spend_by_category(
        entries: &[Entry],
        month: MonthRef,
    ) -> BTreeMap<String, f64> {
        let mut spent: BTreeMap<String, f64> = BTreeMap::new();
        for entry in entries {
            if entry.kind != EntryKind::Expense || !month.contains(entry.date) {
                continue;
            }
            if let Some(category) = entry.category.as_deref() {
                *spent.entry(category.to_string()).or_default() += entry.amount;
            }
        }
        spent
    }

    fn totals_where(entries: &[Entry], keep: impl Fn(&Entry) -> bool) -> Totals {
        let mut income = 0.0;
        let mut expense = 0.0;
        for entry in entries.iter().filter(|entry| keep(entry)) {
            match entry.kind {
                EntryKind::Income => income += entry.amount,
                EntryKind::Expense => expense += entry.amount,
            }
        }
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }
}
