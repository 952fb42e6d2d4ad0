//! Integration tests for hcp-output.

use hcp_core::{AccessId, DepotId, FieldId, HarvesterId, Location, SapId, SiloId, TvId};
use hcp_model::{CampaignState, Field, FieldAccess, Harvester, Silo, SiloAccess, Tv};

/// One 1000 kg field, one 10 kg/s harvester, one 500 kg TV, an unbounded
/// silo, zero transit everywhere.  Completes at t = 120 s.
fn small_campaign() -> CampaignState {
    let depot = Location::Depot(DepotId(0));
    let fields = vec![Field::new(FieldId(0), "field-0", 1_000.0, vec![AccessId(0)])];
    let accesses = vec![FieldAccess { id: AccessId(0), field: FieldId(0) }];
    let harvesters = vec![Harvester::new(HarvesterId(0), "harvester-0", 10.0, depot)];
    let tvs = vec![Tv::new(TvId(0), "tv-0", 500.0, 50.0, depot)];
    let silos = vec![Silo::new(SiloId(0), "silo-0", None, vec![SapId(0)])];
    let saps = vec![SiloAccess::unbounded(SapId(0), SiloId(0))];
    CampaignState::new(fields, accesses, harvesters, tvs, silos, saps, vec![])
}

#[cfg(test)]
mod csv_tests {
    use hcp_engine::{NoopObserver, PlannerBuilder};
    use hcp_policy::GreedyYieldPolicy;
    use hcp_routing::ZeroOracle;
    use tempfile::TempDir;

    use super::small_campaign;
    use crate::csv::CsvWriter;
    use crate::observer::{PlanOutputObserver, write_plan};
    use crate::row::{PlanActionRow, PlanSummaryRow};
    use crate::writer::PlanWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn action_row(agent: &str, start: f64, end: f64, qty: f64) -> PlanActionRow {
        PlanActionRow {
            agent: agent.to_owned(),
            kind: "overload".to_owned(),
            start_secs: start,
            end_secs: end,
            from: "field_0".to_owned(),
            to: "field_0".to_owned(),
            quantity_kg: qty,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("plan_actions.csv").exists());
        assert!(dir.path().join("plan_summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("plan_actions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["agent", "kind", "start_secs", "end_secs", "from", "to", "quantity_kg"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("plan_summary.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["makespan_secs", "harvester_waiting_secs", "tv_waiting_secs", "stored_kg", "action_count"]
        );
    }

    #[test]
    fn csv_action_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![
            action_row("tv_0", 0.0, 50.0, 500.0),
            action_row("tv_1", 60.0, 110.0, 500.0),
        ];
        w.write_actions(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("plan_actions.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 2);
        assert_eq!(&read_rows[0][0], "tv_0");
        assert_eq!(&read_rows[0][1], "overload");
        assert_eq!(&read_rows[0][3], "50"); // end_secs
        assert_eq!(&read_rows[1][0], "tv_1");
        assert_eq!(&read_rows[1][6], "500"); // quantity_kg
    }

    #[test]
    fn csv_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_summary(&PlanSummaryRow {
            makespan_secs: 120.0,
            harvester_waiting_secs: 10.0,
            tv_waiting_secs: 0.0,
            stored_kg: 1_000.0,
            action_count: 8,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("plan_summary.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "120");
        assert_eq!(&read_rows[0][3], "1000");
        assert_eq!(&read_rows[0][4], "8");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_actions_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_actions(&[]).unwrap(); // should return Ok(())
    }

    #[test]
    fn integration_csv() {
        let mut planner =
            PlannerBuilder::new(small_campaign(), GreedyYieldPolicy::default(), ZeroOracle)
                .build()
                .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = PlanOutputObserver::new(writer);
        let plan = planner.construct(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("plan_actions.csv")).unwrap();
        let action_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(action_rows.len(), plan.actions.len());

        let mut rdr2 = csv::Reader::from_path(dir.path().join("plan_summary.csv")).unwrap();
        let summary_rows: Vec<_> = rdr2.records().map(|r| r.unwrap()).collect();
        assert_eq!(summary_rows.len(), 1);
        assert_eq!(&summary_rows[0][0], "120"); // makespan_secs
        assert_eq!(&summary_rows[0][1], "10"); // harvester_waiting_secs
        assert_eq!(&summary_rows[0][3], "1000"); // stored_kg
        assert_eq!(summary_rows[0][4], plan.actions.len().to_string());
    }

    #[test]
    fn write_plan_one_shot() {
        let mut planner =
            PlannerBuilder::new(small_campaign(), GreedyYieldPolicy::default(), ZeroOracle)
                .build()
                .unwrap();
        let plan = planner.construct(&mut NoopObserver).unwrap();

        let dir = tmp();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        write_plan(&mut writer, &plan).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("plan_actions.csv")).unwrap();
        assert_eq!(rdr.records().count(), plan.actions.len());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use hcp_engine::PlannerBuilder;
    use hcp_policy::GreedyYieldPolicy;
    use hcp_routing::ZeroOracle;
    use tempfile::TempDir;

    use super::small_campaign;
    use crate::observer::PlanOutputObserver;
    use crate::sqlite::SqliteWriter;
    use crate::writer::PlanWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("plan.db").exists());
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn integration_sqlite() {
        let mut planner =
            PlannerBuilder::new(small_campaign(), GreedyYieldPolicy::default(), ZeroOracle)
                .build()
                .unwrap();

        let dir = tmp();
        let writer = SqliteWriter::new(dir.path()).unwrap();
        let mut obs = PlanOutputObserver::new(writer);
        let plan = planner.construct(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        drop(obs);

        let conn = rusqlite::Connection::open(dir.path().join("plan.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM plan_actions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count as usize, plan.actions.len());

        let makespan: f64 = conn
            .query_row("SELECT makespan_secs FROM plan_summary", [], |r| r.get(0))
            .unwrap();
        assert_eq!(makespan, 120.0);

        let overloads: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM plan_actions WHERE kind = 'overload'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(overloads, 2);
    }
}
