//! Routing-subsystem error type.

use thiserror::Error;

use hcp_core::{AgentKind, Location};

/// Errors produced by `hcp-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no transit duration from {from} to {to} for {kind}")]
    NoRoute {
        from: Location,
        to: Location,
        kind: AgentKind,
    },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
