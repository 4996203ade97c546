//! Budget utilization: monthly spend measured against configured limits.

use std::{collections::BTreeMap, fmt};

use pocketledger_domain::LimitMap;

use crate::{ledger::Ledger, summary_service::SummaryService, time::Clock};

/// Spend-versus-limit row for one category.
///
/// `percentage` is rounded to two decimals; a zero limit with recorded spend
/// reports `f64::INFINITY` (spending against a zero allowance).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUsage {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub status: UsageStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Classifies a category's utilization for display.
pub enum UsageStatus {
    OverBudget,
    UnderBudget,
    Neutral,
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UsageStatus::OverBudget => "Over budget",
            UsageStatus::UnderBudget => "Under budget",
            UsageStatus::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Stateless evaluator combining aggregated spend with the limit map.
pub struct BudgetService;

impl BudgetService {
    /// Builds the utilization view, one row per category present in
    /// `limits`, sorted alphabetically. Categories without a configured
    /// limit never appear, whatever their spend.
    pub fn utilization(spent_by_category: &BTreeMap<String, f64>, limits: &LimitMap) -> Vec<CategoryUsage> {
        limits
            .iter()
            .map(|(category, &limit)| {
                let spent = spent_by_category.get(category).copied().unwrap_or(0.0);
                let (percentage, status) = if limit > 0.0 {
                    let percentage = round2(spent / limit * 100.0);
                    (percentage, classify(percentage))
                } else if spent > 0.0 {
                    (f64::INFINITY, UsageStatus::OverBudget)
                } else {
                    (0.0, UsageStatus::Neutral)
                };
                CategoryUsage {
                    category: category.clone(),
                    spent,
                    limit,
                    percentage,
                    status,
                }
            })
            .collect()
    }

    /// Utilization for the calendar month the clock currently reports.
    pub fn current_month_usage(ledger: &Ledger, clock: &dyn Clock) -> Vec<CategoryUsage> {
        let spent =
            SummaryService::monthly_spend_by_category(ledger.entries(), clock.current_month());
        Self::utilization(&spent, ledger.limits())
    }
}

fn classify(percentage: f64) -> UsageStatus {
    if percentage > 100.0 {
        UsageStatus::OverBudget
    } else if percentage > 0.0 {
        UsageStatus::UnderBudget
    } else {
        UsageStatus::Neutral
    }
}

/// Rounds to two decimal places, the precision the utilization contract
/// promises to callers.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spent(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(name, amount)| (name.to_string(), *amount))
            .collect()
    }

    fn limits(pairs: &[(&str, f64)]) -> LimitMap {
        pairs
            .iter()
            .map(|(name, amount)| (name.to_string(), *amount))
            .collect()
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        let rows = BudgetService::utilization(
            &spent(&[("Groceries", 100.0)]),
            &limits(&[("Groceries", 300.0)]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].percentage, 33.33);
        assert_eq!(rows[0].status, UsageStatus::UnderBudget);
    }

    #[test]
    fn exactly_at_the_limit_is_still_under_budget() {
        let rows = BudgetService::utilization(
            &spent(&[("Water", 80.0)]),
            &limits(&[("Water", 80.0)]),
        );
        assert_eq!(rows[0].percentage, 100.0);
        assert_eq!(rows[0].status, UsageStatus::UnderBudget);
    }

    #[test]
    fn spend_over_the_limit_is_over_budget() {
        let rows = BudgetService::utilization(
            &spent(&[("Groceries", 300.0)]),
            &limits(&[("Groceries", 250.0)]),
        );
        assert_eq!(rows[0].percentage, 120.0);
        assert_eq!(rows[0].status, UsageStatus::OverBudget);
    }

    #[test]
    fn zero_limit_with_spend_reports_the_infinite_sentinel() {
        let rows = BudgetService::utilization(
            &spent(&[("Groceries", 50.0)]),
            &limits(&[("Groceries", 0.0)]),
        );
        assert!(rows[0].percentage.is_infinite());
        assert_eq!(rows[0].status, UsageStatus::OverBudget);
    }

    #[test]
    fn zero_limit_without_spend_is_neutral() {
        let rows =
            BudgetService::utilization(&spent(&[]), &limits(&[("Groceries", 0.0)]));
        assert_eq!(rows[0].percentage, 0.0);
        assert_eq!(rows[0].status, UsageStatus::Neutral);
    }

    #[test]
    fn unset_limits_are_excluded_even_with_spend() {
        let rows = BudgetService::utilization(
            &spent(&[("Groceries", 50.0), ("Water", 10.0)]),
            &limits(&[("Water", 100.0)]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Water");
    }

    #[test]
    fn rows_come_back_alphabetically() {
        let rows = BudgetService::utilization(
            &spent(&[]),
            &limits(&[("Water", 10.0), ("Electricity", 10.0), ("Groceries", 10.0)]),
        );
        let names: Vec<&str> = rows.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(names, vec!["Electricity", "Groceries", "Water"]);
    }
}
