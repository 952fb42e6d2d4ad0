//! `hcp-output` — plan output writers for the harvest campaign planner.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                           |
//! |-----------|-------------|-----------------------------------------|
//! | *(none)*  | CSV         | `plan_actions.csv`, `plan_summary.csv`  |
//! | `sqlite`  | SQLite      | `plan.db`                               |
//!
//! All backends implement [`PlanWriter`] and are driven by
//! [`PlanOutputObserver`], which implements `hcp_engine::PlanObserver`,
//! or in one shot through [`write_plan`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use hcp_output::{CsvWriter, PlanOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PlanOutputObserver::new(writer);
//! let plan = planner.construct(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{PlanOutputObserver, write_plan};
pub use row::{PlanActionRow, PlanSummaryRow};
pub use writer::PlanWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
