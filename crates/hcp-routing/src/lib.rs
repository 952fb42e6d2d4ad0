//! `hcp-routing` — the transit-duration oracle seam.
//!
//! The planner core never inspects geometry: road networks, infield routes,
//! and satellite data all live in external collaborators.  What crosses the
//! boundary is a single pure function — *how long does it take agent kind K
//! to drive from location A to location B* — expressed as the
//! [`TransitOracle`] trait.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`oracle`] | `TransitOracle` trait, `ZeroOracle`, `UniformOracle`       |
//! | [`matrix`] | `DurationMatrix` — explicit per-pair duration table        |
//! | [`cache`]  | `CachedOracle` — per-(from, to, kind) memoization          |
//! | [`error`]  | `RoutingError`, `RoutingResult`                            |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                            |
//! |-----------|---------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash in the transit cache.   |

pub mod cache;
pub mod error;
pub mod matrix;
pub mod oracle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cache::CachedOracle;
pub use error::{RoutingError, RoutingResult};
pub use matrix::DurationMatrix;
pub use oracle::{TransitOracle, UniformOracle, ZeroOracle};
