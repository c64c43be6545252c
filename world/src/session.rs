//! Shared handle that lets a single writer and many readers use one world.

use std::sync::{Arc, PoisonError, RwLock};

use sneak_core::{Command, Event, WorldSnapshot};

use crate::{apply, query, World};

/// Cloneable handle around a world guarded by a read-write lock.
///
/// Commands run to completion under the write lock, so readers only ever
/// observe the state before or after a whole move or session reset.
#[derive(Clone, Debug)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    /// Wraps the provided world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Applies a command under the write lock and returns the resulting events.
    pub fn submit(&self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        // Mutations are single assignments, so a poisoned lock still guards a whole state.
        let mut world = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut world, command, &mut events);
        events
    }

    /// Runs `read` against the world under the read lock.
    pub fn read<R, F>(&self, read: F) -> R
    where
        F: FnOnce(&World) -> R,
    {
        let world = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        read(&world)
    }

    /// Captures an owned copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        self.read(query::snapshot)
    }
}
