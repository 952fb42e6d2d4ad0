//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `plan.db` file in the configured output directory with
//! two tables: `plan_actions` and `plan_summary`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::PlanWriter;
use crate::{OutputResult, PlanActionRow, PlanSummaryRow};

/// Writes plan output to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `plan.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("plan.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS plan_actions (
                 agent       TEXT    NOT NULL,
                 kind        TEXT    NOT NULL,
                 start_secs  REAL    NOT NULL,
                 end_secs    REAL    NOT NULL,
                 from_loc    TEXT    NOT NULL,
                 to_loc      TEXT    NOT NULL,
                 quantity_kg REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS plan_summary (
                 makespan_secs          REAL    NOT NULL,
                 harvester_waiting_secs REAL    NOT NULL,
                 tv_waiting_secs        REAL    NOT NULL,
                 stored_kg              REAL    NOT NULL,
                 action_count           INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl PlanWriter for SqliteWriter {
    fn write_actions(&mut self, rows: &[PlanActionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO plan_actions \
                 (agent, kind, start_secs, end_secs, from_loc, to_loc, quantity_kg) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent,
                    row.kind,
                    row.start_secs,
                    row.end_secs,
                    row.from,
                    row.to,
                    row.quantity_kg,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &PlanSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO plan_summary \
             (makespan_secs, harvester_waiting_secs, tv_waiting_secs, stored_kg, action_count) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.makespan_secs,
                row.harvester_waiting_secs,
                row.tv_waiting_secs,
                row.stored_kg,
                row.action_count,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
