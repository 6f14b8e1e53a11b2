//! The coordinator tree: exclusive ownership of scenarios, id-based links.
//!
//! A [`ScenarioTree`] owns every registered scenario outright. Parent/child
//! and delegate relations are expressed as plain [`ScenarioId`] values, so no
//! back-reference can keep anything alive: releasing a node from the registry
//! is the end of its life, and any id still pointing at it is simply stale.
//!
//! All operations are synchronous and run to completion on the caller's
//! thread. `start_child` appends the child to the parent's list before
//! invoking the child's `start()` hook, so a starting child can already be
//! found in its parent's child list.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::errors::ScenarioError;
use crate::scenario::{LifecycleState, Scenario};

/// Non-owning identifier for a scenario registered in a [`ScenarioTree`].
///
/// Ids are unique for the lifetime of the tree and never reused, so a stale
/// id can never alias a live scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioId(u64);

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered scenario with its tree bookkeeping.
struct Node {
    scenario: Box<dyn Scenario>,
    /// Back-reference to the parent that will be told when this one finishes.
    delegate: Option<ScenarioId>,
    /// Insertion order is start order.
    children: Vec<ScenarioId>,
    state: LifecycleState,
}

impl Node {
    fn new(scenario: Box<dyn Scenario>) -> Self {
        Self {
            scenario,
            delegate: None,
            children: Vec::new(),
            state: LifecycleState::Created,
        }
    }
}

/// The coordinator tree.
///
/// Scenarios enter through [`insert`](Self::insert), go live through
/// [`start`](Self::start) (roots) or [`start_child`](Self::start_child)
/// (everything else), and leave when their completion is reported through
/// [`finish`](Self::finish) or [`on_child_finished`](Self::on_child_finished).
pub struct ScenarioTree {
    nodes: HashMap<ScenarioId, Node>,
    next_id: u64,
}

impl Default for ScenarioTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a scenario and take ownership of it.
    ///
    /// The scenario starts out `Created`, with no delegate and no children.
    pub fn insert(&mut self, scenario: Box<dyn Scenario>) -> ScenarioId {
        let id = ScenarioId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(scenario));
        debug!(scenario = %id, "scenario registered");
        id
    }

    /// Invoke a scenario's `start()` hook and mark it started.
    ///
    /// Intended for root scenarios; children go live through
    /// [`start_child`](Self::start_child) so their parent is wired up first.
    /// An unknown id is logged and ignored.
    pub fn start(&mut self, id: ScenarioId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            warn!(scenario = %id, "start on unknown scenario");
            return;
        };
        node.scenario.start();
        if node.state == LifecycleState::Created {
            node.state = LifecycleState::Started;
        }
        debug!(scenario = %id, "scenario started");
    }

    /// Invoke a scenario's `stop()` hook and mark it stopped.
    ///
    /// The hook always runs; state tracking never gates it. An unknown id is
    /// logged and ignored.
    pub fn stop(&mut self, id: ScenarioId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            warn!(scenario = %id, "stop on unknown scenario");
            return;
        };
        node.scenario.stop();
        node.state = LifecycleState::Stopped;
        debug!(scenario = %id, "scenario stopped");
    }

    /// Add `child` under `parent` and start it, swallowing any failure.
    ///
    /// This is the call-site form: a rejected attempt is logged at WARN and
    /// the application carries on with no child added and nothing started.
    /// Use [`try_start_child`](Self::try_start_child) to observe the failure.
    pub fn start_child(&mut self, parent: ScenarioId, child: ScenarioId) {
        match self.try_start_child(parent, child) {
            Ok(()) => {}
            Err(err @ ScenarioError::SelfParenting) => {
                warn!(scenario = %parent, %err, "self-parenting rejected");
            }
            Err(err) => {
                warn!(parent = %parent, child = %child, %err, "child scenario not started");
            }
        }
    }

    /// Add `child` under `parent`, then start it.
    ///
    /// On success the child's delegate is set to `parent`, the child is
    /// appended to the parent's child list, and only then does the child's
    /// `start()` hook run. A child that is already parented elsewhere is
    /// moved: it leaves its old parent's list before the new append.
    ///
    /// Fails with [`ScenarioError::SelfParenting`] when `parent == child` and
    /// with [`ScenarioError::UnknownScenario`] when either id is unregistered.
    /// On failure nothing is mutated and `start()` never runs.
    pub fn try_start_child(
        &mut self,
        parent: ScenarioId,
        child: ScenarioId,
    ) -> Result<(), ScenarioError> {
        if parent == child {
            return Err(ScenarioError::SelfParenting);
        }
        if !self.nodes.contains_key(&parent) {
            return Err(ScenarioError::UnknownScenario { id: parent });
        }
        if !self.nodes.contains_key(&child) {
            return Err(ScenarioError::UnknownScenario { id: child });
        }

        self.detach(child);

        // Checks are done; from here on the operation cannot fail. The append
        // happens before start() so the child is discoverable while starting.
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.delegate = Some(parent);
            child_node.scenario.start();
            if child_node.state == LifecycleState::Created {
                child_node.state = LifecycleState::Started;
            }
        }
        debug!(parent = %parent, child = %child, "child scenario started");
        Ok(())
    }

    /// Delegate callback: `child` has reported itself finished to `parent`.
    ///
    /// The child's `stop()` hook runs unconditionally, then every occurrence
    /// of `child` is removed from the parent's child list. Removal is a no-op
    /// when the child was never added there, in which case the child also
    /// stays registered. A detached child is released from the registry along
    /// with its remaining subtree; `stop()` runs only for the reported child.
    pub fn on_child_finished(&mut self, parent: ScenarioId, child: ScenarioId) {
        self.stop(child);

        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            warn!(scenario = %parent, "finish reported to unknown scenario");
            return;
        };
        let before = parent_node.children.len();
        parent_node.children.retain(|id| *id != child);
        if parent_node.children.len() < before {
            self.release_subtree(child);
            debug!(parent = %parent, child = %child, "child scenario released");
        }
    }

    /// Completion reported from below: route to the delegate recorded when
    /// the scenario was started as a child.
    ///
    /// A scenario with no delegate has nobody to tell; it is stopped and
    /// released directly. An unknown id is logged and ignored.
    pub fn finish(&mut self, id: ScenarioId) {
        let delegate = match self.nodes.get(&id) {
            Some(node) => node.delegate,
            None => {
                warn!(scenario = %id, "finish on unknown scenario");
                return;
            }
        };
        match delegate {
            Some(parent) => self.on_child_finished(parent, id),
            None => {
                self.stop(id);
                self.release_subtree(id);
                debug!(scenario = %id, "root scenario released");
            }
        }
    }

    /// Number of registered scenarios.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether an id refers to a registered scenario.
    pub fn contains(&self, id: ScenarioId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// The child list of a scenario, in start order.
    ///
    /// Unknown ids yield an empty slice.
    pub fn children(&self, id: ScenarioId) -> &[ScenarioId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The delegate a scenario will report completion to, if any.
    pub fn delegate_of(&self, id: ScenarioId) -> Option<ScenarioId> {
        self.nodes.get(&id).and_then(|node| node.delegate)
    }

    /// The recorded lifecycle state of a scenario.
    pub fn state(&self, id: ScenarioId) -> Option<LifecycleState> {
        self.nodes.get(&id).map(|node| node.state)
    }

    /// Remove `id` from its current parent's child list, if it has one.
    fn detach(&mut self, id: ScenarioId) {
        let Some(parent) = self.nodes.get(&id).and_then(|node| node.delegate) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| *c != id);
        }
    }

    /// Drop a node and everything still hanging under it.
    ///
    /// No hooks run here. Release is the ownership analogue of deallocation,
    /// not of teardown.
    fn release_subtree(&mut self, id: ScenarioId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        for child in node.children {
            self.release_subtree(child);
        }
    }
}

impl fmt::Debug for ScenarioTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioTree")
            .field("scenarios", &self.nodes.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
