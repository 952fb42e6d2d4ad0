//! Plain data row types written by output backends.

use hcp_engine::{Plan, PlanAction};

/// One plan action, flattened for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanActionRow {
    pub agent: String,
    pub kind: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub from: String,
    pub to: String,
    pub quantity_kg: f64,
}

impl From<&PlanAction> for PlanActionRow {
    fn from(action: &PlanAction) -> Self {
        Self {
            agent: action.agent.to_string(),
            kind: action.kind.to_string(),
            start_secs: action.start.as_secs_f64(),
            end_secs: action.end.as_secs_f64(),
            from: action.from.to_string(),
            to: action.to.to_string(),
            quantity_kg: action.quantity_kg,
        }
    }
}

/// Plan-level summary statistics, one row per constructed plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSummaryRow {
    pub makespan_secs: f64,
    pub harvester_waiting_secs: f64,
    pub tv_waiting_secs: f64,
    pub stored_kg: f64,
    pub action_count: u64,
}

impl From<&Plan> for PlanSummaryRow {
    fn from(plan: &Plan) -> Self {
        Self {
            makespan_secs: plan.stats.makespan.as_secs_f64(),
            harvester_waiting_secs: plan.stats.harvester_waiting.as_secs_f64(),
            tv_waiting_secs: plan.stats.tv_waiting.as_secs_f64(),
            stored_kg: plan.stats.stored_kg,
            action_count: plan.actions.len() as u64,
        }
    }
}
