//! Unit tests for candidate ordering and the scoring policies.

use hcp_core::{
    AccessId, DepotId, FieldId, HarvesterId, Location, SapId, SiloId, SimDuration, SimTime, TvId,
};
use hcp_model::{CampaignState, Field, FieldAccess, Harvester, Silo, SiloAccess, Tv};

use crate::{
    Candidate, CostWindowPolicy, Decision, DispatchPolicy, GreedyYieldPolicy,
    IdleMinimizingPolicy,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two fields (big and small), two harvesters, two TVs, one silo.
fn campaign() -> CampaignState {
    let fields = vec![
        Field::new(FieldId(0), "big", 10_000.0, vec![AccessId(0)]),
        Field::new(FieldId(1), "small", 1_000.0, vec![AccessId(1)]),
    ];
    let field_accesses = vec![
        FieldAccess { id: AccessId(0), field: FieldId(0) },
        FieldAccess { id: AccessId(1), field: FieldId(1) },
    ];
    let harvesters = vec![
        Harvester::new(HarvesterId(0), "h0", 10.0, Location::Depot(DepotId(0))),
        Harvester::new(HarvesterId(1), "h1", 10.0, Location::Depot(DepotId(0))),
    ];
    let tvs = vec![
        Tv::new(TvId(0), "tv0", 500.0, 50.0, Location::Depot(DepotId(1))),
        Tv::new(TvId(1), "tv1", 500.0, 50.0, Location::Depot(DepotId(1))),
    ];
    let silos = vec![Silo::new(SiloId(0), "silo", None, vec![SapId(0)])];
    let silo_accesses = vec![SiloAccess::unbounded(SapId(0), SiloId(0))];
    CampaignState::new(fields, field_accesses, harvesters, tvs, silos, silo_accesses, vec![])
}

fn assign(state: &mut CampaignState, h: HarvesterId, f: FieldId) {
    state.field_mut(f).assigned_harvester = Some(h);
    state.harvester_mut(h).assigned_field = Some(f);
}

fn cand(decision: Decision, transit_secs: u64) -> Candidate {
    Candidate { decision, transit: SimDuration::from_secs(transit_secs) }
}

// ── Ranking determinism ───────────────────────────────────────────────────────

#[cfg(test)]
mod ranking {
    use super::*;

    #[test]
    fn equal_scores_break_on_ordinal() {
        let state = campaign();
        // Identical transits and identical fields → identical scores.
        let candidates = vec![
            cand(
                Decision::AssignField {
                    harvester: HarvesterId(0),
                    field: FieldId(1),
                    access: AccessId(1),
                },
                10,
            ),
            cand(
                Decision::AssignField {
                    harvester: HarvesterId(0),
                    field: FieldId(1),
                    access: AccessId(1),
                },
                10,
            ),
        ];
        let order = IdleMinimizingPolicy.rank(&state, &candidates);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn ranking_is_reproducible() {
        let mut state = campaign();
        assign(&mut state, HarvesterId(0), FieldId(0));
        assign(&mut state, HarvesterId(1), FieldId(1));
        let candidates = vec![
            cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(0) }, 30),
            cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(1) }, 10),
            cand(Decision::Unload { tv: TvId(0), sap: SapId(0) }, 5),
        ];
        let policy = GreedyYieldPolicy::default();
        let first = policy.rank(&state, &candidates);
        let second = policy.rank(&state, &candidates);
        assert_eq!(first, second);
    }
}

// ── GreedyYieldPolicy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod greedy {
    use super::*;

    #[test]
    fn prefers_bigger_field_at_equal_distance() {
        let state = campaign();
        let big = cand(
            Decision::AssignField {
                harvester: HarvesterId(0),
                field: FieldId(0),
                access: AccessId(0),
            },
            60,
        );
        let small = cand(
            Decision::AssignField {
                harvester: HarvesterId(0),
                field: FieldId(1),
                access: AccessId(1),
            },
            60,
        );
        let policy = GreedyYieldPolicy::default();
        assert!(policy.score(&state, &big) < policy.score(&state, &small));
    }

    #[test]
    fn transit_breaks_equal_yield() {
        let mut state = campaign();
        assign(&mut state, HarvesterId(0), FieldId(0));
        assign(&mut state, HarvesterId(1), FieldId(1));
        // Equalize the two fields so only transit differs.
        state.field_mut(FieldId(1)).total_yield_kg = 10_000.0;
        state.field_mut(FieldId(1)).remaining_yield_kg = 10_000.0;

        let near = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(0) }, 10);
        let far = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(1) }, 300);
        let policy = GreedyYieldPolicy::default();
        assert!(policy.score(&state, &near) < policy.score(&state, &far));
    }
}

// ── IdleMinimizingPolicy ──────────────────────────────────────────────────────

#[cfg(test)]
mod idle {
    use super::*;

    #[test]
    fn prefers_starved_harvester_over_backlogged_one() {
        let mut state = campaign();
        assign(&mut state, HarvesterId(0), FieldId(0));
        assign(&mut state, HarvesterId(1), FieldId(1));
        // h0 already has tv1 queued (500 kg spare → 50 s backlog at 10 kg/s).
        state.harvester_mut(HarvesterId(0)).turn_queue.push_back(TvId(1));
        state.tv_mut(TvId(1)).assigned_harvester = Some(HarvesterId(0));

        let to_backlogged = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(0) }, 20);
        let to_starved = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(1) }, 20);
        let policy = IdleMinimizingPolicy;
        assert!(policy.score(&state, &to_starved) < policy.score(&state, &to_backlogged));
    }
}

// ── CostWindowPolicy ──────────────────────────────────────────────────────────

#[cfg(test)]
mod window {
    use super::*;

    /// Inner policy that scores everything identically, exposing only the
    /// window penalty.
    struct Flat;
    impl DispatchPolicy for Flat {
        fn score(&self, _: &CampaignState, _: &Candidate) -> f64 {
            0.0
        }
    }

    #[test]
    fn penalty_kicks_in_past_epsilon() {
        let mut state = campaign();
        assign(&mut state, HarvesterId(0), FieldId(0));
        // 100 s of backlog queued ahead (two full TVs at 10 kg/s would be
        // 100 s; here one 500 kg TV → 50 s).
        state.harvester_mut(HarvesterId(0)).turn_queue.push_back(TvId(1));
        state.tv_mut(TvId(1)).assigned_harvester = Some(HarvesterId(0));

        let candidate = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(0) }, 0);

        // ε = 60 s swallows the 50 s projected wait; ε = 10 s does not.
        let lenient = CostWindowPolicy::new(Flat, SimDuration::from_secs(60), 1.0);
        let strict = CostWindowPolicy::new(Flat, SimDuration::from_secs(10), 1.0);
        assert_eq!(lenient.score(&state, &candidate), 0.0);
        assert_eq!(strict.score(&state, &candidate), 40.0);
    }

    // Compares scores across two TVs, as an external dispatcher choosing
    // which machine to serve next would; within one TV's own candidate set
    // the refund is uniform and changes nothing.
    #[test]
    fn long_waiting_tv_gets_priority_refund() {
        let mut state = campaign();
        assign(&mut state, HarvesterId(0), FieldId(0));
        state.now = SimTime::from_secs(100);
        state.tv_mut(TvId(0)).begin_waiting(SimTime::from_secs(0));

        let waiting = cand(Decision::Assist { tv: TvId(0), harvester: HarvesterId(0) }, 0);
        let fresh = cand(Decision::Assist { tv: TvId(1), harvester: HarvesterId(0) }, 0);

        let policy = CostWindowPolicy::new(Flat, SimDuration::from_secs(30), 1.0);
        // TV 0 has waited 100 s, 70 s past ε → refunded 70.
        assert!(policy.score(&state, &waiting) < policy.score(&state, &fresh));
    }
}
