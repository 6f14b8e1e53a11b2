//! Typed errors for scenario-tree operations.
//!
//! The tree has exactly one checked failure in its public contract:
//! self-parenting. The only other thing that can go wrong is being handed an
//! id that is not (or no longer) registered. Neither ever crosses the tree
//! boundary through the swallowing entry points; see
//! [`crate::tree::ScenarioTree::start_child`].

use thiserror::Error;

use crate::tree::ScenarioId;

/// Errors from scenario-tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("a scenario cannot be added as a child of itself")]
    SelfParenting,

    #[error("unknown scenario {id}")]
    UnknownScenario { id: ScenarioId },
}
