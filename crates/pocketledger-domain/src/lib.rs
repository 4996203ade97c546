//! pocketledger-domain
//!
//! Pure domain models (Entry, CategoryTaxonomy, MonthRef).
//! No I/O, no storage. Only data types and core enums.

pub mod category;
pub mod entry;
pub mod month;

pub use category::*;
pub use entry::*;
pub use month::*;

/// Category name → monthly limit. An absent key means "no limit configured",
/// distinct from a configured limit of zero.
pub type LimitMap = std::collections::BTreeMap<String, f64>;
