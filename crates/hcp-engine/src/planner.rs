//! The `Planner` struct and its event loop.

use hcp_core::{
    AccessId, AgentKind, CompactorId, FieldId, HarvesterId, Location, SapId, SiloId, SimDuration,
    SimTime, TvId,
};
use hcp_model::{
    CampaignState, CompactorState, HarvesterState, TvState, MASS_EPS_KG,
};
use hcp_policy::{Candidate, Decision, DispatchPolicy};
use hcp_routing::{RoutingError, TransitOracle};

use crate::action::{Plan, PlanAction, PlanActionKind, PlanAgent};
use crate::error::{EngineError, EngineResult};
use crate::event::{Event, EventQueue};
use crate::observer::PlanObserver;

// ── Planner ───────────────────────────────────────────────────────────────────

/// The constructive scheduler.
///
/// `Planner<P, O>` owns the campaign state and drives the event loop: pop
/// the earliest event, apply its forced transition, and at decision points
/// enumerate the feasible candidates, rank them through the policy, and
/// commit the best feasible one.  Every committed transfer and every drive
/// is appended to the plan when it completes.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder] for a cold start, or
/// [`Planner::resume`] / [`Planner::resume_from_snapshot`] for replanning.
pub struct Planner<P: DispatchPolicy, O: TransitOracle> {
    /// The campaign world.  Mutated exclusively by the event loop.
    pub state: CampaignState,

    /// Ranks competing choices at decision points.
    pub policy: P,

    /// Travel-duration source for all drives.
    pub oracle: O,

    pub(crate) queue: EventQueue,
    pub(crate) actions: Vec<PlanAction>,
}

impl<P: DispatchPolicy, O: TransitOracle> Planner<P, O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the event loop to completion and return the finished plan.
    ///
    /// Succeeds once every field is harvested, every bunker is empty, and
    /// every SAP is swept clear.  If the queue drains before that, the
    /// campaign is deadlocked and the partial plan is returned inside
    /// [`EngineError::Deadlock`].
    pub fn construct<Ob: PlanObserver>(&mut self, observer: &mut Ob) -> EngineResult<Plan> {
        while self.step(observer)? {}

        let done = self.state.all_fields_harvested()
            && self.state.all_bunkers_empty()
            && self.state.all_saps_cleared();
        if done {
            observer.on_finish(&self.state);
            Ok(Plan::assemble(self.actions.clone(), &self.state))
        } else {
            Err(EngineError::Deadlock {
                time: self.state.now,
                blocked: self.blocked_machines(),
                partial: Box::new(Plan::assemble(self.actions.clone(), &self.state)),
            })
        }
    }

    /// Process all events up to and including `until`, then park the clock
    /// there.  Used to reach a checkpoint instant for replanning.
    pub fn run_until<Ob: PlanObserver>(
        &mut self,
        until: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        while let Some(next) = self.queue.next_time() {
            if next > until {
                break;
            }
            self.step(observer)?;
        }
        if self.state.now < until {
            self.state.now = until;
        }
        Ok(())
    }

    /// The actions recorded so far, in completion order.
    pub fn actions(&self) -> &[PlanAction] {
        &self.actions
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Pop and apply one event.  Returns `false` once the queue is empty.
    fn step<Ob: PlanObserver>(&mut self, observer: &mut Ob) -> EngineResult<bool> {
        let Some((time, event)) = self.queue.pop_first() else {
            return Ok(false);
        };
        debug_assert!(time >= self.state.now, "event queue went backwards");
        self.state.now = time;

        match event.clone() {
            Event::HarvesterArrived { harvester, started } => {
                self.on_harvester_arrived(time, harvester, started, observer)?
            }
            Event::TvArrivedAtField { tv, field, started } => {
                self.on_tv_arrived_at_field(time, tv, field, started, observer)?
            }
            Event::OverloadFinished { harvester, tv, transferred_kg, started } => {
                self.on_overload_finished(time, harvester, tv, transferred_kg, started, observer)?
            }
            Event::TvExitedField { tv, access, started } => {
                self.on_tv_exited_field(time, tv, access, started, observer)?
            }
            Event::HarvesterExited { harvester, access, started } => {
                self.on_harvester_exited(time, harvester, access, started, observer)?
            }
            Event::TvArrivedAtSap { tv, started } => {
                self.on_tv_arrived_at_sap(time, tv, started, observer)?
            }
            Event::UnloadFinished { tv, started } => {
                self.on_unload_finished(time, tv, started, observer)?
            }
            Event::SweepFinished { compactor, sap, started } => {
                self.on_sweep_finished(time, compactor, sap, started, observer)?
            }
            Event::HarvesterDecision { harvester } => {
                self.on_harvester_decision(time, harvester)?
            }
            Event::TvDecision { tv } => self.on_tv_decision(time, tv)?,
        }

        observer.on_event(time, &event, &self.state);
        Ok(true)
    }

    // ── Decision points ───────────────────────────────────────────────────

    fn on_harvester_decision(&mut self, now: SimTime, harvester: HarvesterId) -> EngineResult<()> {
        let candidates = self.field_candidates(harvester)?;
        // No reachable unassigned field: the harvester stays idle.  It is
        // re-offered work the next time another harvester releases a field.
        self.decide(now, candidates)?;
        Ok(())
    }

    fn on_tv_decision(&mut self, now: SimTime, tv: TvId) -> EngineResult<()> {
        let candidates = self.tv_candidates(tv)?;
        let applied = self.decide(now, candidates)?;
        if !applied && !self.state.tv(tv).is_loaded() {
            // Empty and nothing to do: out of the campaign until a new
            // field assignment creates assistance demand again.
            self.state.tv_mut(tv).state = TvState::Done;
        }
        // A loaded TV with no feasible silo stays at its decision point and
        // is reported as blocked if the campaign ends here.
        Ok(())
    }

    /// Walk the policy ranking and commit the first feasible candidate.
    fn decide(&mut self, now: SimTime, candidates: Vec<Candidate>) -> EngineResult<bool> {
        if candidates.is_empty() {
            return Ok(false);
        }
        let order = self.policy.rank(&self.state, &candidates);
        for idx in order {
            match self.try_apply(now, &candidates[idx]) {
                Ok(()) => return Ok(true),
                Err(EngineError::Infeasible(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    /// Feasible field assignments for an idle harvester.
    fn field_candidates(&self, harvester: HarvesterId) -> EngineResult<Vec<Candidate>> {
        let from = self.state.harvester(harvester).location;
        let mut out = Vec::new();
        for field in self.state.unassigned_unfinished_fields() {
            if let Some((access, transit)) =
                self.best_field_entry(from, field.id, AgentKind::Harvester)
            {
                out.push(Candidate {
                    decision: Decision::AssignField { harvester, field: field.id, access },
                    transit,
                });
            }
        }
        Ok(out)
    }

    /// Feasible assist and unload moves for a TV at its decision point.
    ///
    /// A full bunker makes unloading mandatory: assist candidates are only
    /// offered while spare capacity remains.
    fn tv_candidates(&self, tv: TvId) -> EngineResult<Vec<Candidate>> {
        let t = self.state.tv(tv);
        let from = t.location;
        let mut out = Vec::new();

        if !t.is_full() {
            for h in &self.state.harvesters {
                if !self.state.harvester_needs_assistance(h.id) {
                    continue;
                }
                let Some(field) = h.assigned_field else { continue };
                if let Some((_, transit)) =
                    self.best_field_entry(from, field, AgentKind::Transport)
                {
                    out.push(Candidate {
                        decision: Decision::Assist { tv, harvester: h.id },
                        transit,
                    });
                }
            }
        }

        if t.is_loaded() {
            for silo in &self.state.silos {
                // A silo that cannot take the whole bunker is not offered.
                if silo.free_capacity_kg() + MASS_EPS_KG < t.bunker_kg {
                    continue;
                }
                for &sap in &silo.access_points {
                    if let Some(transit) =
                        self.transit_opt(from, Location::SiloAccess(sap), AgentKind::Transport)
                    {
                        out.push(Candidate { decision: Decision::Unload { tv, sap }, transit });
                    }
                }
            }
        }

        Ok(out)
    }

    /// Validate and commit one candidate.  Validation happens against the
    /// *current* state, so a candidate that went stale since enumeration is
    /// rejected with [`EngineError::Infeasible`] before any mutation.
    pub(crate) fn try_apply(&mut self, now: SimTime, candidate: &Candidate) -> EngineResult<()> {
        match candidate.decision {
            Decision::AssignField { harvester, field, access: _ } => {
                let h = self.state.harvester(harvester);
                let f = self.state.field(field);
                if h.state != HarvesterState::Idle
                    || h.assigned_field.is_some()
                    || !f.is_unfinished()
                    || f.assigned_harvester.is_some()
                {
                    return Err(EngineError::Infeasible(candidate.decision));
                }
                self.state.field_mut(field).assigned_harvester = Some(harvester);
                let h = self.state.harvester_mut(harvester);
                h.assigned_field = Some(field);
                h.state = HarvesterState::TravelingToField;
                self.queue
                    .push(now + candidate.transit, Event::HarvesterArrived { harvester, started: now });
                // New assistance demand: bring retired TVs back to their
                // decision points.
                self.wake_done_tvs(now);
            }

            Decision::Assist { tv, harvester } => {
                let t = self.state.tv(tv);
                if t.state != TvState::Decision
                    || t.is_full()
                    || !self.state.harvester_needs_assistance(harvester)
                {
                    return Err(EngineError::Infeasible(candidate.decision));
                }
                let Some(field) = self.state.harvester(harvester).assigned_field else {
                    return Err(EngineError::Infeasible(candidate.decision));
                };
                self.state.harvester_mut(harvester).turn_queue.push_back(tv);
                let t = self.state.tv_mut(tv);
                t.assigned_harvester = Some(harvester);
                t.state = TvState::TravelingToField;
                self.queue.push(
                    now + candidate.transit,
                    Event::TvArrivedAtField { tv, field, started: now },
                );
            }

            Decision::Unload { tv, sap } => {
                let t = self.state.tv(tv);
                let silo = self.state.silo(self.state.silo_access(sap).silo);
                if t.state != TvState::Decision
                    || !t.is_loaded()
                    || silo.free_capacity_kg() + MASS_EPS_KG < t.bunker_kg
                {
                    return Err(EngineError::Infeasible(candidate.decision));
                }
                let t = self.state.tv_mut(tv);
                t.assigned_sap = Some(sap);
                t.state = TvState::TravelingToSilo;
                self.queue
                    .push(now + candidate.transit, Event::TvArrivedAtSap { tv, started: now });
            }
        }
        Ok(())
    }

    // ── Forced transitions ────────────────────────────────────────────────

    fn on_harvester_arrived<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        harvester: HarvesterId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let Some(field) = self.state.harvester(harvester).assigned_field else {
            return Err(EngineError::Protocol("harvester arrived without an assigned field"));
        };
        let from = self.state.harvester(harvester).location;
        let h = self.state.harvester_mut(harvester);
        h.location = Location::Field(field);
        h.state = HarvesterState::WaitingForTv;
        h.begin_waiting(now);
        self.push_action(observer, PlanAction {
            agent: PlanAgent::Harvester(harvester),
            kind: PlanActionKind::Drive,
            start: started,
            end: now,
            from,
            to: Location::Field(field),
            quantity_kg: 0.0,
        });
        self.try_begin_overload(harvester, now);
        Ok(())
    }

    fn on_tv_arrived_at_field<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        tv: TvId,
        field: FieldId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let from = self.state.tv(tv).location;
        self.state.tv_mut(tv).location = Location::Field(field);
        self.push_action(observer, PlanAction {
            agent: PlanAgent::Tv(tv),
            kind: PlanActionKind::Drive,
            start: started,
            end: now,
            from,
            to: Location::Field(field),
            quantity_kg: 0.0,
        });

        match self.state.tv(tv).assigned_harvester {
            Some(h) if self.state.harvester(h).assigned_field == Some(field) => {
                let t = self.state.tv_mut(tv);
                t.state = TvState::WaitingAtField;
                t.begin_waiting(now);
                self.try_begin_overload(h, now);
            }
            _ => {
                // The field was finished while this TV was in transit; its
                // queue membership is already gone.  Decide afresh.
                let t = self.state.tv_mut(tv);
                t.assigned_harvester = None;
                t.state = TvState::Decision;
                self.queue.push(now, Event::TvDecision { tv });
            }
        }
        Ok(())
    }

    fn on_overload_finished<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        harvester: HarvesterId,
        tv: TvId,
        transferred_kg: f64,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let Some(field) = self.state.harvester(harvester).assigned_field else {
            return Err(EngineError::Protocol("overload finished without an assigned field"));
        };

        // Mass transfer, with exact-zero / exact-full snapping so epsilon
        // residues never keep a field or bunker formally open.
        let f = self.state.field_mut(field);
        f.remaining_yield_kg -= transferred_kg;
        if f.remaining_yield_kg <= MASS_EPS_KG {
            f.remaining_yield_kg = 0.0;
        }
        let exhausted = f.remaining_yield_kg <= MASS_EPS_KG;
        let t = self.state.tv_mut(tv);
        t.bunker_kg += transferred_kg;
        if t.spare_capacity_kg() <= MASS_EPS_KG {
            t.bunker_kg = t.capacity_kg;
        }

        self.push_action(observer, PlanAction {
            agent: PlanAgent::Tv(tv),
            kind: PlanActionKind::Overload,
            start: started,
            end: now,
            from: Location::Field(field),
            to: Location::Field(field),
            quantity_kg: transferred_kg,
        });

        // Detach the serviced TV from the turn queue and send it out.
        let h = self.state.harvester_mut(harvester);
        h.active_tv = None;
        let front = h.turn_queue.pop_front();
        debug_assert_eq!(front, Some(tv), "overloading TV was not the queue front");
        self.state.tv_mut(tv).assigned_harvester = None;

        let (exit, exit_dur) = self.best_field_exit(field, AgentKind::Transport)?;
        self.state.tv_mut(tv).state = TvState::ExitingField;
        self.queue
            .push(now + exit_dur, Event::TvExitedField { tv, access: exit, started: now });

        if exhausted {
            // Field done: the harvester leaves, and every TV still queued
            // for it is released to find work elsewhere.
            self.release_queued_tvs(harvester, now);
            let (h_exit, h_dur) = self.best_field_exit(field, AgentKind::Harvester)?;
            self.state.harvester_mut(harvester).state = HarvesterState::ExitingField;
            self.queue.push(
                now + h_dur,
                Event::HarvesterExited { harvester, access: h_exit, started: now },
            );
        } else {
            // Hand the turn to the next queued TV.  If one is already
            // waiting in-field the next leg starts at this same instant and
            // the harvester accrues zero idle time.
            let h = self.state.harvester_mut(harvester);
            h.state = HarvesterState::WaitingForTv;
            h.begin_waiting(now);
            self.try_begin_overload(harvester, now);
        }
        Ok(())
    }

    fn on_tv_exited_field<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        tv: TvId,
        access: AccessId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let from = self.state.tv(tv).location;
        let t = self.state.tv_mut(tv);
        t.location = Location::FieldAccess(access);
        t.state = TvState::Decision;
        self.push_action(observer, PlanAction {
            agent: PlanAgent::Tv(tv),
            kind: PlanActionKind::Drive,
            start: started,
            end: now,
            from,
            to: Location::FieldAccess(access),
            quantity_kg: 0.0,
        });
        self.queue.push(now, Event::TvDecision { tv });
        Ok(())
    }

    fn on_harvester_exited<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        harvester: HarvesterId,
        access: AccessId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let Some(field) = self.state.harvester(harvester).assigned_field else {
            return Err(EngineError::Protocol("harvester exited without an assigned field"));
        };
        let from = self.state.harvester(harvester).location;
        self.push_action(observer, PlanAction {
            agent: PlanAgent::Harvester(harvester),
            kind: PlanActionKind::Drive,
            start: started,
            end: now,
            from,
            to: Location::FieldAccess(access),
            quantity_kg: 0.0,
        });

        let f = self.state.field_mut(field);
        f.harvested = true;
        f.assigned_harvester = None;
        let h = self.state.harvester_mut(harvester);
        h.assigned_field = None;
        h.location = Location::FieldAccess(access);
        h.state = HarvesterState::Idle;
        self.queue.push(now, Event::HarvesterDecision { harvester });
        Ok(())
    }

    fn on_tv_arrived_at_sap<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        tv: TvId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let Some(sap) = self.state.tv(tv).assigned_sap else {
            return Err(EngineError::Protocol("tv arrived at a sap without an assignment"));
        };
        let from = self.state.tv(tv).location;
        let t = self.state.tv_mut(tv);
        t.location = Location::SiloAccess(sap);
        t.state = TvState::WaitingAtSap;
        t.begin_waiting(now);
        self.push_action(observer, PlanAction {
            agent: PlanAgent::Tv(tv),
            kind: PlanActionKind::Drive,
            start: started,
            end: now,
            from,
            to: Location::SiloAccess(sap),
            quantity_kg: 0.0,
        });
        self.state.silo_access_mut(sap).wait_queue.push_back(tv);
        self.service_sap(sap, now);
        Ok(())
    }

    fn on_unload_finished<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        tv: TvId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let Some(sap_id) = self.state.tv(tv).assigned_sap else {
            return Err(EngineError::Protocol("unload finished without an assigned sap"));
        };
        let silo_id = self.state.silo_access(sap_id).silo;
        let bunker = self.state.tv(tv).bunker_kg;

        // The transfer is clamped at the receiving boundary; any remainder
        // stays in the bunker and the TV re-decides with it.
        let transferred = if self.state.silo_access(sap_id).is_pass_through() {
            let free = self.state.silo(silo_id).free_capacity_kg();
            let amount = bunker.min(free);
            self.state.silo_mut(silo_id).stored_kg += amount;
            amount
        } else {
            let free = self.state.silo_access(sap_id).free_capacity_kg();
            let amount = bunker.min(free);
            let sap = self.state.silo_access_mut(sap_id);
            sap.held_kg += amount;
            sap.occupant = None;
            amount
        };
        let t = self.state.tv_mut(tv);
        t.bunker_kg -= transferred;
        if t.bunker_kg <= MASS_EPS_KG {
            t.bunker_kg = 0.0;
        }
        t.assigned_sap = None;
        t.state = TvState::Decision;

        self.push_action(observer, PlanAction {
            agent: PlanAgent::Tv(tv),
            kind: PlanActionKind::Unload,
            start: started,
            end: now,
            from: Location::SiloAccess(sap_id),
            to: Location::SiloAccess(sap_id),
            quantity_kg: -transferred,
        });

        self.queue.push(now, Event::TvDecision { tv });
        self.dispatch_compactors(silo_id, now);
        self.service_sap(sap_id, now);
        Ok(())
    }

    fn on_sweep_finished<Ob: PlanObserver>(
        &mut self,
        now: SimTime,
        compactor: CompactorId,
        sap: SapId,
        started: SimTime,
        observer: &mut Ob,
    ) -> EngineResult<()> {
        let silo_id = self.state.silo_access(sap).silo;
        let per_sweep = self.state.compactor(compactor).mass_per_sweep_kg;
        let held = self.state.silo_access(sap).held_kg;
        let free = self.state.silo(silo_id).free_capacity_kg();
        let amount = per_sweep.min(held).min(free);

        let s = self.state.silo_access_mut(sap);
        s.held_kg -= amount;
        if s.held_kg <= MASS_EPS_KG {
            s.held_kg = 0.0;
        }
        self.state.silo_mut(silo_id).stored_kg += amount;
        self.state.compactor_mut(compactor).state = CompactorState::Idle;

        self.push_action(observer, PlanAction {
            agent: PlanAgent::Compactor(compactor),
            kind: PlanActionKind::Sweep,
            start: started,
            end: now,
            from: Location::SiloAccess(sap),
            to: Location::SiloAccess(sap),
            quantity_kg: amount,
        });

        // Freed SAP capacity may admit a waiting TV; leftover held yield
        // keeps the compactor busy.
        self.service_sap(sap, now);
        self.dispatch_compactors(silo_id, now);
        Ok(())
    }

    // ── Synchronization helpers ───────────────────────────────────────────

    /// Start the next overload leg if the harvester and its front TV are
    /// both in-field and ready.  Idempotent; called at every instant where
    /// readiness may have changed.
    pub(crate) fn try_begin_overload(&mut self, harvester: HarvesterId, now: SimTime) {
        let h = self.state.harvester(harvester);
        if h.state != HarvesterState::WaitingForTv {
            return;
        }
        let Some(field) = h.assigned_field else { return };
        let Some(tv) = h.front_tv() else { return };
        let t = self.state.tv(tv);
        if t.state != TvState::WaitingAtField || t.location != Location::Field(field) {
            return;
        }
        let transferable = t.spare_capacity_kg().min(self.state.field(field).remaining_yield_kg);
        if transferable <= MASS_EPS_KG {
            return;
        }
        let duration = SimDuration::from_secs_f64(transferable / h.working_rate_kg_s);

        let h = self.state.harvester_mut(harvester);
        h.end_waiting(now);
        h.state = HarvesterState::Harvesting;
        h.active_tv = Some(tv);
        let t = self.state.tv_mut(tv);
        t.end_waiting(now);
        t.state = TvState::Overloading;
        self.queue.push(
            now + duration,
            Event::OverloadFinished { harvester, tv, transferred_kg: transferable, started: now },
        );
    }

    /// Admit waiting TVs at `sap` as far as occupancy and capacity allow.
    pub(crate) fn service_sap(&mut self, sap: SapId, now: SimTime) {
        loop {
            let s = self.state.silo_access(sap);
            let Some(&front) = s.wait_queue.front() else { break };
            if !s.is_pass_through() {
                if s.occupant.is_some() {
                    break;
                }
                if s.free_capacity_kg() + MASS_EPS_KG < self.state.tv(front).bunker_kg {
                    // Not enough local capacity yet; a sweep will re-try.
                    break;
                }
                self.state.silo_access_mut(sap).occupant = Some(front);
            }
            self.state.silo_access_mut(sap).wait_queue.pop_front();
            let t = self.state.tv_mut(front);
            t.end_waiting(now);
            t.state = TvState::Unloading;
            let duration = SimDuration::from_secs_f64(t.bunker_kg / t.unload_rate_kg_s);
            self.queue.push(now + duration, Event::UnloadFinished { tv: front, started: now });
        }
    }

    /// Put every idle compactor of `silo` to work on the fullest held SAP.
    pub(crate) fn dispatch_compactors(&mut self, silo: SiloId, now: SimTime) {
        if self.state.silo(silo).free_capacity_kg() <= MASS_EPS_KG {
            return;
        }
        let idle: Vec<_> = self
            .state
            .compactors
            .iter()
            .filter(|c| c.silo == silo && c.state == CompactorState::Idle)
            .map(|c| c.id)
            .collect();
        for compactor in idle {
            let target = self
                .state
                .silo(silo)
                .access_points
                .iter()
                .map(|&sap| (sap, self.state.silo_access(sap).held_kg))
                .filter(|&(_, held)| held > MASS_EPS_KG)
                .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)));
            let Some((sap, _)) = target else { break };
            let duration = self.state.silo_access(sap).sweep_duration;
            self.state.compactor_mut(compactor).state = CompactorState::Sweeping(sap);
            self.queue
                .push(now + duration, Event::SweepFinished { compactor, sap, started: now });
        }
    }

    /// Release every TV still queued for `harvester` (its field is done).
    /// Waiting TVs re-decide immediately; in-transit TVs re-decide on
    /// arrival.
    fn release_queued_tvs(&mut self, harvester: HarvesterId, now: SimTime) {
        let released: Vec<TvId> =
            self.state.harvester_mut(harvester).turn_queue.drain(..).collect();
        for tv in released {
            let t = self.state.tv_mut(tv);
            t.assigned_harvester = None;
            if t.state == TvState::WaitingAtField {
                t.end_waiting(now);
                t.state = TvState::Decision;
                self.queue.push(now, Event::TvDecision { tv });
            }
        }
    }

    /// Re-schedule a decision for every retired TV.
    fn wake_done_tvs(&mut self, now: SimTime) {
        let done: Vec<TvId> = self
            .state
            .tvs
            .iter()
            .filter(|t| t.state == TvState::Done)
            .map(|t| t.id)
            .collect();
        for tv in done {
            self.state.tv_mut(tv).state = TvState::Decision;
            self.queue.push(now, Event::TvDecision { tv });
        }
    }

    // ── Routing helpers ───────────────────────────────────────────────────

    fn transit_opt(&self, from: Location, to: Location, kind: AgentKind) -> Option<SimDuration> {
        match self.oracle.transit(from, to, kind) {
            Ok(d) => Some(d),
            Err(RoutingError::NoRoute { .. }) => None,
        }
    }

    /// Cheapest way into a field: entry access plus the in-field leg to the
    /// overload-start location.  `None` if no access is reachable.
    pub(crate) fn best_field_entry(
        &self,
        from: Location,
        field: FieldId,
        kind: AgentKind,
    ) -> Option<(AccessId, SimDuration)> {
        let mut best: Option<(AccessId, SimDuration)> = None;
        for &access in &self.state.field(field).access_points {
            let Some(to_access) = self.transit_opt(from, Location::FieldAccess(access), kind)
            else {
                continue;
            };
            let Some(infield) =
                self.transit_opt(Location::FieldAccess(access), Location::Field(field), kind)
            else {
                continue;
            };
            let total = to_access + infield;
            // Strict less-than keeps the first-listed access on ties.
            if best.is_none_or(|(_, d)| total < d) {
                best = Some((access, total));
            }
        }
        best
    }

    /// Cheapest way out of a field, from the overload-start location.
    pub(crate) fn best_field_exit(
        &self,
        field: FieldId,
        kind: AgentKind,
    ) -> EngineResult<(AccessId, SimDuration)> {
        let mut best: Option<(AccessId, SimDuration)> = None;
        for &access in &self.state.field(field).access_points {
            let Some(d) =
                self.transit_opt(Location::Field(field), Location::FieldAccess(access), kind)
            else {
                continue;
            };
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((access, d));
            }
        }
        best.ok_or(EngineError::NoFieldExit { field, kind })
    }

    // ── Bookkeeping ───────────────────────────────────────────────────────

    fn push_action<Ob: PlanObserver>(&mut self, observer: &mut Ob, action: PlanAction) {
        observer.on_action(&action);
        self.actions.push(action);
    }

    /// Machines unable to make progress, for deadlock reporting.
    fn blocked_machines(&self) -> Vec<PlanAgent> {
        // While unharvested fields remain, an idle harvester is blocked
        // too: it found no feasible assignment at its decision point.
        let fields_remain = !self.state.all_fields_harvested();
        let mut blocked = Vec::new();
        for h in &self.state.harvesters {
            if h.state != HarvesterState::Idle || h.assigned_field.is_some() || fields_remain {
                blocked.push(PlanAgent::Harvester(h.id));
            }
        }
        for t in &self.state.tvs {
            let parked = matches!(t.state, TvState::Done | TvState::Decision);
            if t.is_loaded() || !parked {
                blocked.push(PlanAgent::Tv(t.id));
            }
        }
        for c in &self.state.compactors {
            if c.state != CompactorState::Idle {
                blocked.push(PlanAgent::Compactor(c.id));
            }
        }
        blocked
    }
}
