//! `PlanOutputObserver<W>` — bridges `PlanObserver` to a `PlanWriter`.

use hcp_engine::{Plan, PlanAction, PlanObserver};
use hcp_core::SimTime;
use hcp_model::CampaignState;

use crate::row::{PlanActionRow, PlanSummaryRow};
use crate::writer::PlanWriter;
use crate::{OutputError, OutputResult};

/// Rows buffered before each batched write.
const BATCH_SIZE: usize = 1024;

/// A [`PlanObserver`] that streams plan actions into any [`PlanWriter`]
/// backend (CSV, SQLite) and writes the summary row when the campaign
/// completes.
///
/// Errors from the writer are stored internally because `PlanObserver`
/// methods have no return value.  After `construct` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct PlanOutputObserver<W: PlanWriter> {
    writer: W,
    buffer: Vec<PlanActionRow>,
    makespan: SimTime,
    action_count: u64,
    last_error: Option<OutputError>,
}

impl<W: PlanWriter> PlanOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(BATCH_SIZE),
            makespan: SimTime::ZERO,
            action_count: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `construct` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after planning).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_actions(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: PlanWriter> PlanObserver for PlanOutputObserver<W> {
    fn on_action(&mut self, action: &PlanAction) {
        self.makespan = self.makespan.max(action.end);
        self.action_count += 1;
        self.buffer.push(PlanActionRow::from(action));
        if self.buffer.len() >= BATCH_SIZE {
            self.flush_buffer();
        }
    }

    fn on_finish(&mut self, state: &CampaignState) {
        self.flush_buffer();
        let row = PlanSummaryRow {
            makespan_secs: self.makespan.as_secs_f64(),
            harvester_waiting_secs: state
                .harvesters
                .iter()
                .map(|h| h.total_waiting.as_secs_f64())
                .sum(),
            tv_waiting_secs: state.tvs.iter().map(|t| t.total_waiting.as_secs_f64()).sum(),
            stored_kg: state.mass_stored(),
            action_count: self.action_count,
        };
        let result = self.writer.write_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Write an already constructed [`Plan`] (complete or partial) to `writer`
/// in one go.
pub fn write_plan<W: PlanWriter>(writer: &mut W, plan: &Plan) -> OutputResult<()> {
    let rows: Vec<PlanActionRow> = plan.actions.iter().map(PlanActionRow::from).collect();
    writer.write_actions(&rows)?;
    writer.write_summary(&PlanSummaryRow::from(plan))?;
    writer.finish()
}
