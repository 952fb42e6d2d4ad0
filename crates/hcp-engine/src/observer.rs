//! Plan-construction observer for progress reporting and data collection.

use hcp_core::SimTime;
use hcp_model::CampaignState;

use crate::action::PlanAction;
use crate::event::Event;

/// Callbacks invoked by [`Planner::construct`][crate::Planner::construct] as
/// the plan is built.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — invariant checker
///
/// ```rust,ignore
/// struct AuditObserver;
///
/// impl PlanObserver for AuditObserver {
///     fn on_event(&mut self, _time: SimTime, _event: &Event, state: &CampaignState) {
///         state.audit().unwrap();
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called after each event's transition has been applied.  `state` is
    /// the campaign state *after* the transition.
    fn on_event(&mut self, _time: SimTime, _event: &Event, _state: &CampaignState) {}

    /// Called when an action is appended to the plan.
    fn on_action(&mut self, _action: &PlanAction) {}

    /// Called once when the campaign completes successfully.
    fn on_finish(&mut self, _state: &CampaignState) {}
}

/// A [`PlanObserver`] that does nothing.  Use when you need to call
/// `construct` but don't want callbacks.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
