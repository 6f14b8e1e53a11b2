//! Scenario-tree coordination for application shells.
//!
//! A scenario is a mediator that owns one screen handle and manages the
//! lifecycle of the child scenarios it spawns. The [`ScenarioTree`] owns
//! every scenario and routes completion reports from children back to the
//! parents that started them.

pub mod errors;
pub mod scenario;
pub mod tree;

pub use errors::ScenarioError;
pub use scenario::{LifecycleState, Scenario, ScreenScenario, TabBarScenario};
pub use tree::{ScenarioId, ScenarioTree};
