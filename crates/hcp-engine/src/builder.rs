//! Builder for constructing a [`Planner`].

use hcp_core::{AgentKind, Location};
use hcp_model::{CampaignState, CompactorState, HarvesterState, TvState};
use hcp_policy::DispatchPolicy;
use hcp_routing::TransitOracle;

use crate::error::{EngineError, EngineResult};
use crate::event::{Event, EventQueue};
use crate::planner::Planner;

/// Builder for [`Planner<P, O>`].
///
/// Validates the campaign (full model audit plus engine-side rate checks)
/// and seeds the event queue from the machine states, so `build` works both
/// for a cold start at `SimTime::ZERO` and for a state restored from an
/// external snapshot.
///
/// Mid-transfer states (`Harvesting`, `Overloading`, `Unloading`,
/// `Sweeping`) carry scheduled completions that a snapshot alone cannot
/// express; restoring those requires [`Planner::resume`] with a checkpoint.
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(state, GreedyYieldPolicy::default(), oracle)
///     .build()?;
/// let plan = planner.construct(&mut NoopObserver)?;
/// ```
pub struct PlannerBuilder<P: DispatchPolicy, O: TransitOracle> {
    state: CampaignState,
    policy: P,
    oracle: O,
}

impl<P: DispatchPolicy, O: TransitOracle> PlannerBuilder<P, O> {
    pub fn new(state: CampaignState, policy: P, oracle: O) -> Self {
        Self { state, policy, oracle }
    }

    /// Validate the campaign and return a ready-to-run [`Planner`].
    pub fn build(self) -> EngineResult<Planner<P, O>> {
        self.state.audit()?;
        validate_rates(&self.state)?;
        validate_no_mid_transfer(&self.state)?;

        let mut planner = Planner {
            state: self.state,
            policy: self.policy,
            oracle: self.oracle,
            queue: EventQueue::new(),
            actions: Vec::new(),
        };
        seed_events(&mut planner)?;
        Ok(planner)
    }
}

fn validate_rates(state: &CampaignState) -> EngineResult<()> {
    for h in &state.harvesters {
        if h.working_rate_kg_s <= 0.0 {
            return Err(EngineError::Config(format!(
                "harvester {} has non-positive working rate {}",
                h.id, h.working_rate_kg_s
            )));
        }
    }
    for t in &state.tvs {
        if t.capacity_kg <= 0.0 {
            return Err(EngineError::Config(format!(
                "tv {} has non-positive bunker capacity {}",
                t.id, t.capacity_kg
            )));
        }
        if t.unload_rate_kg_s <= 0.0 {
            return Err(EngineError::Config(format!(
                "tv {} has non-positive unload rate {}",
                t.id, t.unload_rate_kg_s
            )));
        }
    }
    for c in &state.compactors {
        if c.mass_per_sweep_kg <= 0.0 {
            return Err(EngineError::Config(format!(
                "compactor {} has non-positive sweep mass {}",
                c.id, c.mass_per_sweep_kg
            )));
        }
    }
    Ok(())
}

fn validate_no_mid_transfer(state: &CampaignState) -> EngineResult<()> {
    for h in &state.harvesters {
        if h.state == HarvesterState::Harvesting {
            return Err(EngineError::Config(format!(
                "harvester {} is mid-overload; resume from a checkpoint instead",
                h.id
            )));
        }
        if h.state == HarvesterState::Idle && h.assigned_field.is_some() {
            return Err(EngineError::Config(format!(
                "idle harvester {} holds a field assignment",
                h.id
            )));
        }
    }
    for t in &state.tvs {
        if matches!(t.state, TvState::Overloading | TvState::Unloading) {
            return Err(EngineError::Config(format!(
                "tv {} is mid-transfer; resume from a checkpoint instead",
                t.id
            )));
        }
    }
    for c in &state.compactors {
        if matches!(c.state, CompactorState::Sweeping(_)) {
            return Err(EngineError::Config(format!(
                "compactor {} is mid-sweep; resume from a checkpoint instead",
                c.id
            )));
        }
    }
    Ok(())
}

/// Schedule the next transition for every machine, from its current state.
fn seed_events<P: DispatchPolicy, O: TransitOracle>(
    planner: &mut Planner<P, O>,
) -> EngineResult<()> {
    let now = planner.state.now;

    for i in 0..planner.state.harvesters.len() {
        let h = &planner.state.harvesters[i];
        let (id, loc) = (h.id, h.location);
        match h.state {
            HarvesterState::Idle => {
                planner.queue.push(now, Event::HarvesterDecision { harvester: id });
            }
            HarvesterState::TravelingToField => {
                let Some(field) = h.assigned_field else {
                    return Err(EngineError::Config(format!(
                        "traveling harvester {id} has no assigned field"
                    )));
                };
                let (_, dur) = planner
                    .best_field_entry(loc, field, AgentKind::Harvester)
                    .ok_or(EngineError::NoFieldEntry { field, kind: AgentKind::Harvester })?;
                planner
                    .queue
                    .push(now + dur, Event::HarvesterArrived { harvester: id, started: now });
            }
            HarvesterState::WaitingForTv => {
                planner.state.harvesters[i].begin_waiting(now);
                // Overload attempts run below, once all TVs are seeded.
            }
            HarvesterState::ExitingField => {
                let Some(field) = h.assigned_field else {
                    return Err(EngineError::Config(format!(
                        "exiting harvester {id} has no assigned field"
                    )));
                };
                let (access, dur) = planner.best_field_exit(field, AgentKind::Harvester)?;
                planner.queue.push(
                    now + dur,
                    Event::HarvesterExited { harvester: id, access, started: now },
                );
            }
            HarvesterState::Harvesting => unreachable!("rejected by validation"),
        }
    }

    for i in 0..planner.state.tvs.len() {
        let t = &planner.state.tvs[i];
        let (id, loc) = (t.id, t.location);
        match t.state {
            TvState::Decision => {
                planner.queue.push(now, Event::TvDecision { tv: id });
            }
            TvState::TravelingToField => {
                let field = t
                    .assigned_harvester
                    .and_then(|h| planner.state.harvester(h).assigned_field)
                    .ok_or_else(|| {
                        EngineError::Config(format!("traveling tv {id} has no target field"))
                    })?;
                let (_, dur) = planner
                    .best_field_entry(loc, field, AgentKind::Transport)
                    .ok_or(EngineError::NoFieldEntry { field, kind: AgentKind::Transport })?;
                planner
                    .queue
                    .push(now + dur, Event::TvArrivedAtField { tv: id, field, started: now });
            }
            TvState::WaitingAtField => {
                planner.state.tvs[i].begin_waiting(now);
            }
            TvState::ExitingField => {
                let Location::Field(field) = loc else {
                    return Err(EngineError::Config(format!(
                        "exiting tv {id} is not at an in-field location"
                    )));
                };
                let (access, dur) = planner.best_field_exit(field, AgentKind::Transport)?;
                planner
                    .queue
                    .push(now + dur, Event::TvExitedField { tv: id, access, started: now });
            }
            TvState::TravelingToSilo => {
                let Some(sap) = t.assigned_sap else {
                    return Err(EngineError::Config(format!(
                        "traveling tv {id} has no assigned sap"
                    )));
                };
                let dur = planner.oracle.transit(
                    loc,
                    Location::SiloAccess(sap),
                    AgentKind::Transport,
                )?;
                planner.queue.push(now + dur, Event::TvArrivedAtSap { tv: id, started: now });
            }
            TvState::WaitingAtSap => {
                let Some(sap) = t.assigned_sap else {
                    return Err(EngineError::Config(format!(
                        "waiting tv {id} has no assigned sap"
                    )));
                };
                planner.state.tvs[i].begin_waiting(now);
                let s = planner.state.silo_access_mut(sap);
                if !s.wait_queue.contains(&id) {
                    s.wait_queue.push_back(id);
                }
            }
            TvState::Done => {}
            TvState::Overloading | TvState::Unloading => unreachable!("rejected by validation"),
        }
    }

    // With every machine scheduled or parked, fire the instantaneous
    // synchronization attempts.
    let waiting: Vec<_> = planner
        .state
        .harvesters
        .iter()
        .filter(|h| h.state == HarvesterState::WaitingForTv)
        .map(|h| h.id)
        .collect();
    for h in waiting {
        planner.try_begin_overload(h, now);
    }
    let queued_saps: Vec<_> = planner
        .state
        .silo_accesses
        .iter()
        .filter(|s| !s.wait_queue.is_empty())
        .map(|s| s.id)
        .collect();
    for sap in queued_saps {
        planner.service_sap(sap, now);
    }
    let silos: Vec<_> = planner.state.silos.iter().map(|s| s.id).collect();
    for silo in silos {
        planner.dispatch_compactors(silo, now);
    }
    Ok(())
}
