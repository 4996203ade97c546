//! pocketledger-core
//!
//! Ledger store, aggregation, and budget-utilization services.
//! Depends on pocketledger-domain. No terminal I/O, no direct filesystem
//! access; persistence goes through the [`KeyValueStore`] seam.

pub mod budget_service;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use budget_service::*;
pub use error::{CoreError, Result};
pub use ledger::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
