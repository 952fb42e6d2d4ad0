//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `plan_actions.csv`
//! - `plan_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::PlanWriter;
use crate::{OutputResult, PlanActionRow, PlanSummaryRow};

/// Writes plan output to two CSV files.
pub struct CsvWriter {
    actions: Writer<File>,
    summary: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut actions = Writer::from_path(dir.join("plan_actions.csv"))?;
        actions.write_record(["agent", "kind", "start_secs", "end_secs", "from", "to", "quantity_kg"])?;

        let mut summary = Writer::from_path(dir.join("plan_summary.csv"))?;
        summary.write_record([
            "makespan_secs",
            "harvester_waiting_secs",
            "tv_waiting_secs",
            "stored_kg",
            "action_count",
        ])?;

        Ok(Self { actions, summary, finished: false })
    }
}

impl PlanWriter for CsvWriter {
    fn write_actions(&mut self, rows: &[PlanActionRow]) -> OutputResult<()> {
        for row in rows {
            self.actions.write_record(&[
                row.agent.clone(),
                row.kind.clone(),
                row.start_secs.to_string(),
                row.end_secs.to_string(),
                row.from.clone(),
                row.to.clone(),
                row.quantity_kg.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &PlanSummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.makespan_secs.to_string(),
            row.harvester_waiting_secs.to_string(),
            row.tv_waiting_secs.to_string(),
            row.stored_kg.to_string(),
            row.action_count.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.actions.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
