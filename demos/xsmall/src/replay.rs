//! Replays a generated scenario through the simulator.
//!
//! `ScenarioPlayer` registers each parcel in the tick whose lapse covers its
//! arrival time; `ParcelModel` claims the parcels and logs when their time
//! windows open.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

use pdp_core::TimeLapse;
use pdp_scenario::{AddParcelEvent, ParcelDto};
use pdp_sim::{
    downcast_object, ListenerResult, Model, SimObject, SimulatorApi, SimulatorUser, TickListener,
};

// ── Event log ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LogRow {
    pub time:   u64,
    pub parcel: usize,
    pub event:  &'static str,
}

pub type EventLog = Arc<Mutex<Vec<LogRow>>>;

fn push(log: &EventLog, time: u64, parcel: usize, event: &'static str) {
    log.lock().unwrap_or_else(|e| e.into_inner()).push(LogRow { time, parcel, event });
}

// ── Parcel ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Parcel {
    pub id:  usize,
    pub dto: ParcelDto,
}

impl SimObject for Parcel {}

// ── ParcelModel ───────────────────────────────────────────────────────────────

/// Claims every registered [`Parcel`] and reports window openings each tick.
pub struct ParcelModel {
    parcels: Mutex<Vec<Arc<Parcel>>>,
    api:     OnceLock<SimulatorApi>,
    log:     EventLog,
}

impl ParcelModel {
    pub fn new(log: EventLog) -> Self {
        Self { parcels: Mutex::new(Vec::new()), api: OnceLock::new(), log }
    }

    fn parcels(&self) -> std::sync::MutexGuard<'_, Vec<Arc<Parcel>>> {
        self.parcels.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Model for ParcelModel {
    fn name(&self) -> &'static str {
        "parcel-model"
    }

    fn register(&self, object: &Arc<dyn SimObject>) -> bool {
        let Some(parcel) = downcast_object::<Parcel>(object) else {
            return false;
        };
        let now = self.api.get().and_then(|api| api.current_time().ok()).unwrap_or_default();
        push(&self.log, now, parcel.id, "announced");
        self.parcels().push(parcel);
        true
    }

    fn unregister(&self, object: &Arc<dyn SimObject>) -> bool {
        let Some(parcel) = downcast_object::<Parcel>(object) else {
            return false;
        };
        let mut parcels = self.parcels();
        let before = parcels.len();
        parcels.retain(|p| !Arc::ptr_eq(p, &parcel));
        parcels.len() != before
    }

    fn as_tick_listener(self: Arc<Self>) -> Option<Arc<dyn TickListener>> {
        Some(self)
    }

    fn as_simulator_user(self: Arc<Self>) -> Option<Arc<dyn SimulatorUser>> {
        Some(self)
    }
}

impl TickListener for ParcelModel {
    fn tick(&self, _lapse: &TimeLapse) -> ListenerResult {
        Ok(())
    }

    // Parcels announced during this tick are already claimed here.
    fn after_tick(&self, lapse: &TimeLapse) -> ListenerResult {
        for p in self.parcels().iter() {
            if lapse.contains(p.dto.pickup_time_window.begin) {
                push(&self.log, p.dto.pickup_time_window.begin, p.id, "pickup_open");
            }
            if lapse.contains(p.dto.delivery_time_window.begin) {
                push(&self.log, p.dto.delivery_time_window.begin, p.id, "delivery_open");
            }
        }
        Ok(())
    }
}

impl SimulatorUser for ParcelModel {
    fn set_simulator(&self, api: SimulatorApi) {
        let _ = self.api.set(api);
    }
}

// ── ScenarioPlayer ────────────────────────────────────────────────────────────

/// Feeds scenario events into the simulator and stops it at the horizon.
pub struct ScenarioPlayer {
    pending:  Mutex<VecDeque<(usize, AddParcelEvent)>>,
    end_time: u64,
    api:      OnceLock<SimulatorApi>,
}

impl ScenarioPlayer {
    pub fn new(events: Vec<AddParcelEvent>, end_time: u64) -> Self {
        Self {
            pending: Mutex::new(events.into_iter().enumerate().collect()),
            end_time,
            api: OnceLock::new(),
        }
    }

    fn api(&self) -> Result<&SimulatorApi, pdp_sim::CallbackError> {
        self.api.get().ok_or_else(|| "scenario player is not registered".into())
    }
}

impl TickListener for ScenarioPlayer {
    fn tick(&self, lapse: &TimeLapse) -> ListenerResult {
        let api = self.api()?;
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        while pending.front().is_some_and(|(_, e)| e.time < lapse.end_time()) {
            let Some((id, event)) = pending.pop_front() else { break };
            api.register(Arc::new(Parcel { id, dto: event.parcel }))?;
        }
        Ok(())
    }

    fn after_tick(&self, lapse: &TimeLapse) -> ListenerResult {
        if lapse.end_time() >= self.end_time {
            self.api()?.stop()?;
        }
        Ok(())
    }
}

impl SimulatorUser for ScenarioPlayer {
    fn set_simulator(&self, api: SimulatorApi) {
        let _ = self.api.set(api);
    }
}

impl SimObject for ScenarioPlayer {
    fn as_tick_listener(self: Arc<Self>) -> Option<Arc<dyn TickListener>> {
        Some(self)
    }

    fn as_simulator_user(self: Arc<Self>) -> Option<Arc<dyn SimulatorUser>> {
        Some(self)
    }
}
