//! Static category taxonomy used to validate and enumerate expense categories.

use std::collections::BTreeSet;

/// Read-only grouping of category names under display-group labels.
///
/// Built once at initialization and never persisted; membership checks go
/// through an explicit set rather than scanning the groups.
#[derive(Debug, Clone)]
pub struct CategoryTaxonomy {
    groups: Vec<CategoryGroup>,
    members: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub label: String,
    pub categories: Vec<String>,
}

impl CategoryTaxonomy {
    pub fn new(groups: Vec<CategoryGroup>) -> Self {
        let members = groups
            .iter()
            .flat_map(|group| group.categories.iter().cloned())
            .collect();
        Self { groups, members }
    }

    /// The default grouping shipped with the application.
    pub fn standard() -> Self {
        let group = |label: &str, names: &[&str]| CategoryGroup {
            label: label.to_string(),
            categories: names.iter().map(|name| name.to_string()).collect(),
        };
        Self::new(vec![
            group(
                "Monthly Fixed Expenses",
                &[
                    "Rent/Mortgage",
                    "Rates & Taxes",
                    "Security",
                    "Electricity",
                    "Water",
                    "Internet",
                    "Cell Phone",
                    "Insurance (Home/Car)",
                    "Loan Repayments",
                    "Childcare/School Fees",
                    "HOA/Body Corporate Fees",
                    "Waste Management",
                ],
            ),
            group(
                "Monthly Variable Expenses",
                &[
                    "Groceries",
                    "Fuel/Petrol",
                    "Public Transport",
                    "Vehicle Maintenance",
                    "Dining Out/Takeaways",
                    "Personal Care",
                    "Clothing",
                    "Entertainment",
                    "Health/Medical",
                    "Pet Care",
                    "Gifts/Donations",
                    "Subscriptions (Other)",
                    "Home Maintenance Fund",
                    "Miscellaneous",
                    "Coffee/Snacks",
                    "Parking/Tolls",
                ],
            ),
            group(
                "Savings & Investments",
                &[
                    "Emergency Fund",
                    "Retirement Savings",
                    "Investments",
                    "Holiday Fund",
                    "New Car Fund",
                    "Education Fund",
                    "Large Purchase Fund",
                ],
            ),
            group(
                "Debt Repayments (Non-Mortgage)",
                &["Credit Card Payments", "Personal Loans", "Student Loans"],
            ),
        ])
    }

    /// Returns `true` when `name` is a recognized category.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Iterates groups in configured order.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// All category names, sorted alphabetically for stable display.
    pub fn all_names(&self) -> Vec<&str> {
        self.members.iter().map(String::as_str).collect()
    }
}
