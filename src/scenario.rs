//! The `Scenario` capability and ready-made handle carriers.
//!
//! This module provides:
//! - `Scenario` trait, the `{start, stop}` capability every coordinated unit implements
//! - `LifecycleState` tracking where a scenario sits in its lifecycle
//! - `ScreenScenario`, a carrier for a single exclusively-owned screen handle
//! - `TabBarScenario`, the variant that additionally owns an optional navigation stack

/// Lifecycle capability implemented by every coordinated unit.
///
/// Both methods default to no-ops; concrete screen scenarios override them
/// with whatever presentation and teardown calls their host framework needs.
/// The base contract does not make either method idempotent. Implementors
/// that can be started or stopped twice must handle that themselves.
pub trait Scenario {
    /// Executes the actions that bring this unit's screen live.
    fn start(&mut self) {}

    /// Executes teardown actions for this unit.
    fn stop(&mut self) {}
}

/// Where a scenario sits in its lifecycle.
///
/// Transitions are one-way: `Created` to `Started` on start, `Started` to
/// `Stopped` on stop. There is no way back out of `Stopped`. The tree records
/// this per node for observability; it never gates hook invocation on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Registered but not yet started
    #[default]
    Created,
    /// `start()` has run
    Started,
    /// `stop()` has run; terminal
    Stopped,
}

impl LifecycleState {
    /// Check if the scenario has been started.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Check if the scenario is in its terminal state.
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// A scenario that owns exactly one screen handle and nothing else.
///
/// `H` is whatever the host UI framework hands out as the root of the screen
/// this scenario controls. The handle is exclusively owned: no other scenario
/// can reach it. Start and stop are the default no-ops; units that need real
/// presentation work implement [`Scenario`] on their own types instead.
#[derive(Debug)]
pub struct ScreenScenario<H> {
    root: H,
}

impl<H> ScreenScenario<H> {
    /// Create a scenario around the given screen root.
    pub fn new(root: H) -> Self {
        Self { root }
    }

    /// The screen root this scenario controls.
    pub fn root(&self) -> &H {
        &self.root
    }

    /// Mutable access to the screen root.
    pub fn root_mut(&mut self) -> &mut H {
        &mut self.root
    }

    /// Consume the scenario and recover the handle.
    pub fn into_root(self) -> H {
        self.root
    }
}

impl<H> Scenario for ScreenScenario<H> {}

/// Scenario variant for screens presented inside a tabbed navigation container.
///
/// Extends the data model with one additional owned handle, a navigation
/// stack `N`, which may be absent. Adds no behavior beyond the base
/// capability set and overrides nothing.
#[derive(Debug)]
pub struct TabBarScenario<H, N> {
    root: H,
    nav: Option<N>,
}

impl<H, N> TabBarScenario<H, N> {
    /// Create a tab scenario with no navigation stack attached yet.
    pub fn new(root: H) -> Self {
        Self { root, nav: None }
    }

    /// Create a tab scenario with its navigation stack.
    pub fn with_nav(root: H, nav: N) -> Self {
        Self {
            root,
            nav: Some(nav),
        }
    }

    /// The screen root this scenario controls.
    pub fn root(&self) -> &H {
        &self.root
    }

    /// Mutable access to the screen root.
    pub fn root_mut(&mut self) -> &mut H {
        &mut self.root
    }

    /// The navigation stack, if one is attached.
    pub fn nav(&self) -> Option<&N> {
        self.nav.as_ref()
    }

    /// Mutable access to the navigation stack.
    pub fn nav_mut(&mut self) -> Option<&mut N> {
        self.nav.as_mut()
    }

    /// Attach or replace the navigation stack, returning the previous one.
    pub fn set_nav(&mut self, nav: N) -> Option<N> {
        self.nav.replace(nav)
    }

    /// Detach the navigation stack.
    pub fn take_nav(&mut self) -> Option<N> {
        self.nav.take()
    }
}

impl<H, N> Scenario for TabBarScenario<H, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_state_helpers() {
        assert!(!LifecycleState::Created.is_started());
        assert!(LifecycleState::Started.is_started());
        assert!(!LifecycleState::Started.is_stopped());
        assert!(LifecycleState::Stopped.is_stopped());
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut scenario = ScreenScenario::new("home");
        scenario.start();
        scenario.stop();
        assert_eq!(*scenario.root(), "home");
    }

    #[test]
    fn test_tab_scenario_nav_attachment() {
        let mut tab: TabBarScenario<&str, &str> = TabBarScenario::new("library");
        assert!(tab.nav().is_none());

        assert_eq!(tab.set_nav("library-stack"), None);
        assert_eq!(tab.nav(), Some(&"library-stack"));

        assert_eq!(tab.take_nav(), Some("library-stack"));
        assert!(tab.nav().is_none());
    }

    #[test]
    fn test_tab_scenario_with_nav() {
        let tab = TabBarScenario::with_nav("feed", "feed-stack");
        assert_eq!(*tab.root(), "feed");
        assert_eq!(tab.nav(), Some(&"feed-stack"));
    }
}
