//! The restricted simulator handle given to [`SimulatorUser`]s.
//!
//! [`SimulatorUser`]: crate::SimulatorUser

use std::sync::{Arc, Weak};

use pdp_core::{SimRng, TimeUnit};

use crate::sim::Shared;
use crate::{SimError, SimObject, SimResult, Simulator};

/// Public simulator operations, without access to the model registry or the
/// raw listener containers.
///
/// Holds a weak reference: objects stored inside the simulator can keep this
/// handle without creating a reference cycle.  Every call fails with
/// [`SimError::Detached`] once the simulator has been dropped.
#[derive(Clone)]
pub struct SimulatorApi {
    shared: Weak<Shared>,
}

impl SimulatorApi {
    pub(crate) fn new(shared: &Arc<Shared>) -> Self {
        Self { shared: Arc::downgrade(shared) }
    }

    fn sim(&self) -> SimResult<Simulator> {
        self.shared
            .upgrade()
            .map(Simulator::from_shared)
            .ok_or(SimError::Detached)
    }

    /// `true` if this handle was issued by `sim` (or one of its clones).
    pub fn is_for(&self, sim: &Simulator) -> bool {
        std::ptr::eq(self.shared.as_ptr(), Arc::as_ptr(&sim.shared))
    }

    pub fn current_time(&self) -> SimResult<u64> {
        Ok(self.sim()?.current_time())
    }

    pub fn time_step(&self) -> SimResult<u64> {
        Ok(self.sim()?.time_step())
    }

    pub fn time_unit(&self) -> SimResult<TimeUnit> {
        Ok(self.sim()?.time_unit())
    }

    pub fn is_playing(&self) -> SimResult<bool> {
        Ok(self.sim()?.is_playing())
    }

    pub fn register(&self, object: Arc<dyn SimObject>) -> SimResult<()> {
        self.sim()?.register(object)
    }

    pub fn unregister(&self, object: &Arc<dyn SimObject>) -> SimResult<()> {
        self.sim()?.unregister(object)
    }

    pub fn stop(&self) -> SimResult<()> {
        self.sim()?.stop();
        Ok(())
    }

    pub fn toggle_play_pause(&self) -> SimResult<()> {
        self.sim()?.toggle_play_pause()
    }

    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SimRng) -> T) -> SimResult<T> {
        Ok(self.sim()?.with_rng(f))
    }
}

impl std::fmt::Debug for SimulatorApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatorApi")
            .field("attached", &(self.shared.strong_count() > 0))
            .finish()
    }
}
