/*!
 * Shared Simulator
 * Mutex-guarded handle for hosts that drive the simulator from several threads
 */

use super::MemorySimulator;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one simulator
///
/// The whole block list is the lock granularity: every operation holds the
/// lock from start to finish, so callers never observe a half-applied split
/// or merge.
#[derive(Clone, Default)]
pub struct SharedSimulator {
    inner: Arc<Mutex<MemorySimulator>>,
}

impl SharedSimulator {
    pub fn new(simulator: MemorySimulator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulator)),
        }
    }

    /// Run `f` with exclusive access to the simulator
    pub fn with<R>(&self, f: impl FnOnce(&mut MemorySimulator) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Copy of the simulator state at this instant
    pub fn snapshot(&self) -> MemorySimulator {
        self.inner.lock().clone()
    }
}

impl std::fmt::Debug for SharedSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(sim) => f.debug_tuple("SharedSimulator").field(&*sim).finish(),
            None => f.write_str("SharedSimulator(<locked>)"),
        }
    }
}
