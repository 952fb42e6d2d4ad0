//! The `PlanWriter` trait implemented by all backend writers.

use crate::{OutputResult, PlanActionRow, PlanSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`PlanOutputObserver::take_error`][crate::PlanOutputObserver::take_error].
pub trait PlanWriter {
    /// Write a batch of plan action rows.
    fn write_actions(&mut self, rows: &[PlanActionRow]) -> OutputResult<()>;

    /// Write one plan summary row.
    fn write_summary(&mut self, row: &PlanSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
