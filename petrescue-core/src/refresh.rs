//! Invalidation signal shared by the views.
//!
//! The root of the app owns one [`RefreshTrigger`] and bumps it after every
//! successful mutation. Each view keeps its own [`RefreshWatcher`] and
//! re-runs its fetch whenever the watcher reports a generation it has not
//! seen yet. There is no shared case cache; every view fetches on its own.

/// Monotonically increasing generation counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RefreshTrigger {
    generation: u64,
}

impl RefreshTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Signal that the backend data changed. Returns the new generation.
    pub fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        log::debug!("refresh trigger bumped to {}", self.generation);
        self.generation
    }
}

/// Remembers the last generation a view fetched for.
#[derive(Debug, Clone, Default)]
pub struct RefreshWatcher {
    seen: Option<u64>,
}

impl RefreshWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time it is called and after every bump.
    pub fn observe(&mut self, trigger: &RefreshTrigger) -> bool {
        let generation = trigger.generation();
        if self.seen == Some(generation) {
            return false;
        }
        self.seen = Some(generation);
        true
    }
}
