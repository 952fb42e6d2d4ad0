use thiserror::Error;

use hcp_core::{AgentKind, FieldId, SimTime};
use hcp_model::ModelError;
use hcp_policy::Decision;
use hcp_routing::RoutingError;

use crate::action::{Plan, PlanAgent};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("campaign configuration error: {0}")]
    Config(String),

    /// A decision would violate a hard invariant.  Raised by the apply step
    /// per candidate; the engine recovers by walking the policy ranking.
    #[error("infeasible decision: {0:?}")]
    Infeasible(Decision),

    #[error("no route into field {field} for {kind}")]
    NoFieldEntry { field: FieldId, kind: AgentKind },

    #[error("no exit route from field {field} for {kind}")]
    NoFieldExit { field: FieldId, kind: AgentKind },

    /// The event queue drained with work remaining: no machine can make
    /// progress.  Carries the blocked machines and the partial plan built
    /// so far.
    #[error("scheduling deadlock at {time}: {} machine(s) blocked with work remaining", blocked.len())]
    Deadlock {
        time: SimTime,
        blocked: Vec<PlanAgent>,
        partial: Box<Plan>,
    },

    /// A scheduled event found the state in a shape the synchronization
    /// protocol forbids.  Always an engine defect, never user input.
    #[error("synchronization protocol violation: {0}")]
    Protocol(&'static str),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type EngineResult<T> = Result<T, EngineError>;
