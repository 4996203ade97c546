//! The ledger store: owns the entry collection and the limit map, validates
//! mutations at the boundary, and persists through the [`KeyValueStore`] seam.

use std::{mem, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use pocketledger_domain::{CategoryTaxonomy, Entry, LimitMap};

use crate::{
    storage::{KeyValueStore, ENTRIES_KEY, LIMITS_KEY},
    CoreError, Result,
};

/// Exclusive in-process owner of the ledger state.
///
/// Hydrates from the persistence provider on open and writes the touched
/// collection back after every successful mutation. A validation failure
/// leaves both memory and storage untouched.
pub struct Ledger {
    store: Arc<dyn KeyValueStore>,
    taxonomy: CategoryTaxonomy,
    entries: Vec<Entry>,
    limits: LimitMap,
}

/// Owned copy of the ledger state for detached computation or display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    pub entries: Vec<Entry>,
    pub limits: LimitMap,
}

impl Ledger {
    /// Opens a ledger against the given provider, loading both collections.
    /// A key absent from the provider hydrates as empty.
    pub fn open(store: Arc<dyn KeyValueStore>, taxonomy: CategoryTaxonomy) -> Result<Self> {
        let entries = match store.load(ENTRIES_KEY)? {
            Some(value) => {
                let raw: Vec<Entry> = serde_json::from_value(value)?;
                let total = raw.len();
                let entries: Vec<Entry> =
                    raw.into_iter().filter(Entry::is_well_formed).collect();
                if entries.len() < total {
                    warn!(
                        dropped = total - entries.len(),
                        "dropped persisted entries that violate ledger invariants"
                    );
                }
                entries
            }
            None => Vec::new(),
        };
        let limits = match store.load(LIMITS_KEY)? {
            Some(value) => {
                let raw: LimitMap = serde_json::from_value(value)?;
                let total = raw.len();
                let limits: LimitMap = raw
                    .into_iter()
                    .filter(|(_, limit)| limit.is_finite() && *limit >= 0.0)
                    .collect();
                if limits.len() < total {
                    warn!(
                        dropped = total - limits.len(),
                        "dropped persisted limits with invalid amounts"
                    );
                }
                limits
            }
            None => LimitMap::new(),
        };
        debug!(
            entries = entries.len(),
            limits = limits.len(),
            "ledger hydrated"
        );
        Ok(Self {
            store,
            taxonomy,
            entries,
            limits,
        })
    }

    /// Records an income entry for `date`.
    pub fn add_income(
        &mut self,
        date: NaiveDate,
        amount: f64,
        description: Option<String>,
    ) -> Result<&Entry> {
        validate_amount(amount)?;
        let entry = Entry::income(date, amount, description);
        self.append_entry(entry)
    }

    /// Records an expense entry for `date` under a recognized category.
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        amount: f64,
        category: &str,
        description: Option<String>,
    ) -> Result<&Entry> {
        validate_amount(amount)?;
        self.validate_category(category)?;
        let entry = Entry::expense(date, amount, category, description);
        self.append_entry(entry)
    }

    /// Removes the entry with the given id, reporting whether one was found.
    /// An absent id is a no-op, not an error.
    pub fn remove_entry(&mut self, id: Uuid) -> Result<bool> {
        let Some(position) = self.entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };
        let removed = self.entries.remove(position);
        if let Err(err) = self.persist_entries() {
            self.entries.insert(position, removed);
            return Err(err);
        }
        debug!(%id, "entry removed");
        Ok(true)
    }

    /// Sets or clears the monthly limit for one category.
    ///
    /// `Some(limit)` with a finite non-negative value stores it; `None` or an
    /// invalid value deletes the key, leaving the category explicitly
    /// unlimited. A zero limit is stored: it means "no spending allowed".
    pub fn set_limit(&mut self, category: &str, limit: Option<f64>) -> Result<()> {
        self.validate_category(category)?;
        let previous = match accepted_limit(limit) {
            Some(limit) => self.limits.insert(category.to_string(), limit),
            None => self.limits.remove(category),
        };
        if let Err(err) = self.persist_limits() {
            match previous {
                Some(limit) => self.limits.insert(category.to_string(), limit),
                None => self.limits.remove(category),
            };
            return Err(err);
        }
        debug!(category, ?limit, "limit updated");
        Ok(())
    }

    /// Applies a batch of limit edits as one persisted write, the shape of a
    /// "save limits" form submission. Each pair follows [`Ledger::set_limit`]
    /// semantics; every category is validated before anything changes.
    pub fn set_limits<I>(&mut self, desired: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        let desired: Vec<(String, Option<f64>)> = desired.into_iter().collect();
        for (category, _) in &desired {
            self.validate_category(category)?;
        }
        let mut next = self.limits.clone();
        for (category, limit) in desired {
            match accepted_limit(limit) {
                Some(limit) => next.insert(category, limit),
                None => next.remove(&category),
            };
        }
        let previous = mem::replace(&mut self.limits, next);
        if let Err(err) = self.persist_limits() {
            self.limits = previous;
            return Err(err);
        }
        debug!(limits = self.limits.len(), "limit map saved");
        Ok(())
    }

    /// Empties both collections and deletes both persisted keys. Idempotent.
    pub fn clear_all(&mut self) -> Result<()> {
        let entries = mem::take(&mut self.entries);
        let limits = mem::take(&mut self.limits);
        let cleared = self
            .store
            .remove(ENTRIES_KEY)
            .and_then(|_| self.store.remove(LIMITS_KEY));
        if let Err(err) = cleared {
            self.entries = entries;
            self.limits = limits;
            return Err(err);
        }
        debug!("ledger cleared");
        Ok(())
    }

    /// Read-only view of the stored entries, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Read-only view of the configured limits.
    pub fn limits(&self) -> &LimitMap {
        &self.limits
    }

    /// The taxonomy this ledger validates expense categories against.
    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    /// Owned copy of both collections.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self.entries.clone(),
            limits: self.limits.clone(),
        }
    }

    /// Entries in list-display order: newest date first, optionally filtered
    /// to a single date. Order among entries sharing a date is unspecified.
    pub fn entries_for_display(&self, filter: Option<NaiveDate>) -> Vec<&Entry> {
        let mut listed: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| filter.map(|date| entry.date == date).unwrap_or(true))
            .collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date));
        listed
    }

    fn append_entry(&mut self, entry: Entry) -> Result<&Entry> {
        self.entries.push(entry);
        if let Err(err) = self.persist_entries() {
            self.entries.pop();
            return Err(err);
        }
        let entry = &self.entries[self.entries.len() - 1];
        debug!(id = %entry.id, kind = %entry.kind, "entry added");
        Ok(entry)
    }

    fn validate_category(&self, category: &str) -> Result<()> {
        if category.trim().is_empty() {
            return Err(CoreError::Validation(
                "A category is required for expenses".into(),
            ));
        }
        if !self.taxonomy.contains(category) {
            return Err(CoreError::Validation(format!(
                "Unknown category: {category}"
            )));
        }
        Ok(())
    }

    fn persist_entries(&self) -> Result<()> {
        let value = serde_json::to_value(&self.entries)?;
        self.store.save(ENTRIES_KEY, &value)
    }

    fn persist_limits(&self) -> Result<()> {
        let value = serde_json::to_value(&self.limits)?;
        self.store.save(LIMITS_KEY, &value)
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Amount must be a positive number, got {amount}"
    )))
}

/// Maps a requested limit to its stored form: finite non-negative values are
/// kept, anything else clears the key.
fn accepted_limit(limit: Option<f64>) -> Option<f64> {
    limit.filter(|value| value.is_finite() && *value >= 0.0)
}
