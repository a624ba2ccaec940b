//! The `Simulator` handle, its play/pause/stop state machine, and the
//! registration protocol.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use pdp_core::{SimRng, TimeLapse, TimeUnit};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, trace};

use crate::object::object_key;
use crate::{Model, SimError, SimObject, SimObserver, SimResult, SimulatorApi, TickListener};

// ── PlayState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayState::Stopped => "stopped",
            PlayState::Playing => "playing",
            PlayState::Paused  => "paused",
        };
        f.write_str(s)
    }
}

// ── Registration records ──────────────────────────────────────────────────────

/// What registration did for one object, as reported by
/// [`Simulator::registration`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RegistrationInfo {
    /// Indices into [`Simulator::models`] of the models that claimed the object.
    pub models:         Vec<usize>,
    pub tick_listener:  bool,
    pub simulator_user: bool,
}

struct Registration {
    object: Arc<dyn SimObject>,
    info:   RegistrationInfo,
}

struct ListenerSlot {
    key:      usize,
    listener: Arc<dyn TickListener>,
}

/// The dynamic part of the simulator: tracked objects and the ordered
/// tick-listener list.  Model listeners sit at the head of the list.
#[derive(Default)]
pub(crate) struct Registry {
    objects:   FxHashMap<usize, Registration>,
    listeners: Vec<ListenerSlot>,
}

impl Registry {
    pub(crate) fn push_listener(&mut self, key: usize, listener: Arc<dyn TickListener>) {
        self.listeners.push(ListenerSlot { key, listener });
    }

    fn snapshot(&self) -> Vec<Arc<dyn TickListener>> {
        self.listeners.iter().map(|s| Arc::clone(&s.listener)).collect()
    }
}

// ── Control state ─────────────────────────────────────────────────────────────

pub(crate) struct Control {
    pub(crate) state: PlayState,
    pub(crate) time:  u64,
    /// Set while some thread is executing ticks (a run, or manual stepping).
    busy:             bool,
    /// Set by `stop()`; ends manual stepping, which runs while `Stopped`.
    stop_requested:   bool,
}

impl Control {
    pub(crate) fn new() -> Self {
        Self { state: PlayState::Stopped, time: 0, busy: false, stop_requested: false }
    }
}

/// Returns the simulator to idle when ticking ends, whether by return or by
/// a panicking listener.
struct BusyGuard<'a> {
    sim: &'a Simulator,
    /// `true` for a `start()` run, which also owns the play state.
    run: bool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let time = {
            let mut control = lock(&self.sim.shared.control);
            control.busy = false;
            if self.run {
                control.state = PlayState::Stopped;
            }
            control.time
        };
        self.sim.shared.changed.notify_all();
        if std::thread::panicking() {
            error!(time, "tick aborted by a panicking listener");
        }
        if self.run {
            self.sim.notify(|o| o.on_stopped(time));
        }
    }
}

// ── Shared state ──────────────────────────────────────────────────────────────

pub(crate) struct Shared {
    pub(crate) models:    Vec<Arc<dyn Model>>,
    pub(crate) time_step: u64,
    pub(crate) time_unit: TimeUnit,
    pub(crate) control:   Mutex<Control>,
    /// Signalled whenever `control.state` changes.
    pub(crate) changed:   Condvar,
    pub(crate) registry:  Mutex<Registry>,
    pub(crate) observers: Mutex<Vec<Arc<dyn SimObserver>>>,
    pub(crate) rng:       Mutex<SimRng>,
}

/// Lock `m`, recovering the data if a panicking thread poisoned it.  Every
/// critical section leaves the protected state consistent.
#[inline]
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The simulation kernel.
///
/// `Simulator` is a cheap `Clone` handle; all clones drive the same
/// simulation.  It owns:
///
/// - the simulation clock (milliseconds, advanced only by the tick loop),
/// - the model registry, fixed at build time,
/// - the set of registered objects and the ordered tick-listener list,
/// - the play state.
///
/// # Tick loop
///
/// [`start`][Self::start] blocks the calling thread and repeats, until
/// stopped:
///
/// 1. snapshot the tick-listener list,
/// 2. call `tick` on every listener in order,
/// 3. call `after_tick` on every listener in order,
/// 4. advance the clock by one time step.
///
/// While paused the loop sleeps on a condition variable.  Control operations
/// may be called from any thread, including from inside listener callbacks;
/// they take effect at the next loop check.  Registrations made during a tick
/// are first notified on the following tick.
///
/// Create via [`SimulatorBuilder`][crate::SimulatorBuilder].
#[derive(Clone)]
pub struct Simulator {
    pub(crate) shared: Arc<Shared>,
}

impl Simulator {
    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    // ── Time queries ──────────────────────────────────────────────────────

    /// Current simulation time in milliseconds.
    pub fn current_time(&self) -> u64 {
        lock(&self.shared.control).time
    }

    /// Length of one tick in milliseconds.
    #[inline]
    pub fn time_step(&self) -> u64 {
        self.shared.time_step
    }

    /// The unit the tick length was configured in.
    #[inline]
    pub fn time_unit(&self) -> TimeUnit {
        self.shared.time_unit
    }

    // ── Models & registry ─────────────────────────────────────────────────

    /// The model registry, in factory order.
    #[inline]
    pub fn models(&self) -> &[Arc<dyn Model>] {
        &self.shared.models
    }

    /// Register `object`.
    ///
    /// 1. Objects that are [`Model`]s are rejected with
    ///    [`SimError::UnsupportedOperation`]: models are fixed at build time.
    /// 2. The object is offered to every model in registry order.
    /// 3. If it is a [`SimulatorUser`][crate::SimulatorUser] it receives a
    ///    [`SimulatorApi`].
    /// 4. If it is a [`TickListener`] it is appended to the listener list.
    ///
    /// Registering an object that is already tracked fails with
    /// [`SimError::AlreadyRegistered`].
    pub fn register(&self, object: Arc<dyn SimObject>) -> SimResult<()> {
        if Arc::clone(&object).as_model().is_some() {
            return Err(SimError::UnsupportedOperation(
                "models can only be added through SimulatorBuilder::add_model".into(),
            ));
        }

        let key = object_key(&object);
        {
            let mut reg = lock(&self.shared.registry);
            if reg.objects.contains_key(&key) {
                return Err(SimError::AlreadyRegistered(format!("object at {key:#x}")));
            }
            // Reserve the slot so a concurrent duplicate registration fails.
            reg.objects.insert(key, Registration {
                object: Arc::clone(&object),
                info:   RegistrationInfo::default(),
            });
        }

        // Model hooks and the user hook run without any lock held.
        let claimed: Vec<usize> = self
            .shared
            .models
            .iter()
            .enumerate()
            .filter(|(_, m)| m.register(&object))
            .map(|(i, _)| i)
            .collect();

        let user = Arc::clone(&object).as_simulator_user();
        if let Some(user) = &user {
            user.set_simulator(self.api());
        }

        let listener = Arc::clone(&object).as_tick_listener();
        let info = RegistrationInfo {
            models:         claimed,
            tick_listener:  listener.is_some(),
            simulator_user: user.is_some(),
        };

        let mut reg = lock(&self.shared.registry);
        if let Some(entry) = reg.objects.get_mut(&key) {
            debug!(
                key,
                models = info.models.len(),
                tick_listener = info.tick_listener,
                simulator_user = info.simulator_user,
                "registered object"
            );
            entry.info = info;
            if let Some(listener) = listener {
                reg.push_listener(key, listener);
            }
            return Ok(());
        }
        drop(reg);

        // Unregistered concurrently before the claims were recorded; release
        // them here instead.
        for &i in &info.models {
            self.shared.models[i].unregister(&object);
        }
        Ok(())
    }

    /// Unregister `object`.
    ///
    /// Models can never be unregistered ([`SimError::InvalidArgument`]).
    /// Unregistering an object that is not tracked is a no-op.
    pub fn unregister(&self, object: &Arc<dyn SimObject>) -> SimResult<()> {
        if Arc::clone(object).as_model().is_some() {
            return Err(SimError::InvalidArgument(
                "models are permanent and can not be unregistered".into(),
            ));
        }

        let key = object_key(object);
        let removed = {
            let mut reg = lock(&self.shared.registry);
            let removed = reg.objects.remove(&key);
            if removed.as_ref().is_some_and(|r| r.info.tick_listener) {
                reg.listeners.retain(|slot| slot.key != key);
            }
            removed
        };

        let Some(registration) = removed else {
            trace!(key, "unregister of untracked object ignored");
            return Ok(());
        };

        for &i in &registration.info.models {
            self.shared.models[i].unregister(&registration.object);
        }
        debug!(key, models = registration.info.models.len(), "unregistered object");
        Ok(())
    }

    /// `true` if `object` is currently tracked.
    pub fn is_registered(&self, object: &Arc<dyn SimObject>) -> bool {
        lock(&self.shared.registry).objects.contains_key(&object_key(object))
    }

    /// What registration recorded for `object`, or `None` if it is not tracked.
    pub fn registration(&self, object: &Arc<dyn SimObject>) -> Option<RegistrationInfo> {
        lock(&self.shared.registry)
            .objects
            .get(&object_key(object))
            .map(|r| r.info.clone())
    }

    /// Number of tracked objects (models excluded).
    pub fn registered_count(&self) -> usize {
        lock(&self.shared.registry).objects.len()
    }

    /// Number of tick listeners, including models that listen.
    pub fn tick_listener_count(&self) -> usize {
        lock(&self.shared.registry).listeners.len()
    }

    /// A restricted handle to this simulator, as given to simulator users.
    pub fn api(&self) -> SimulatorApi {
        SimulatorApi::new(&self.shared)
    }

    // ── Observers & randomness ────────────────────────────────────────────

    /// Attach a lifecycle observer.
    pub fn add_observer(&self, observer: Arc<dyn SimObserver>) {
        lock(&self.shared.observers).push(observer);
    }

    /// Run `f` with exclusive access to the simulator's random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SimRng) -> T) -> T {
        f(&mut lock(&self.shared.rng))
    }

    // ── Playback control ──────────────────────────────────────────────────

    pub fn state(&self) -> PlayState {
        lock(&self.shared.control).state
    }

    /// `true` iff the state is [`PlayState::Playing`].
    pub fn is_playing(&self) -> bool {
        self.state() == PlayState::Playing
    }

    /// Run the tick loop on the calling thread until [`stop`][Self::stop] is
    /// called or a listener fails.
    ///
    /// Time is not reset: a second `start` continues from the current time.
    /// Fails with [`SimError::UnsupportedOperation`] if a run is already
    /// active.  A listener error ends the run (state `Stopped`) and is
    /// returned.
    pub fn start(&self) -> SimResult<()> {
        let time = {
            let mut control = lock(&self.shared.control);
            Self::check_idle(&control, "start()")?;
            control.state = PlayState::Playing;
            control.busy = true;
            control.stop_requested = false;
            control.time
        };
        self.shared.changed.notify_all();
        info!(time, time_step = self.shared.time_step, "simulation started");
        self.notify(|o| o.on_started(time));

        let result = {
            let _guard = BusyGuard { sim: self, run: true };
            self.run_loop()
        };

        let time = self.current_time();
        match &result {
            Ok(())  => info!(time, "simulation stopped"),
            Err(e)  => error!(time, error = %e, "simulation aborted"),
        }
        result
    }

    /// Flip between `Playing` and `Paused`.
    ///
    /// Fails with [`SimError::UnsupportedOperation`] while stopped.
    pub fn toggle_play_pause(&self) -> SimResult<()> {
        let (state, time) = {
            let mut control = lock(&self.shared.control);
            control.state = match control.state {
                PlayState::Playing => PlayState::Paused,
                PlayState::Paused  => PlayState::Playing,
                PlayState::Stopped => {
                    return Err(SimError::UnsupportedOperation(
                        "toggle_play_pause() while the simulator is stopped".into(),
                    ));
                }
            };
            (control.state, control.time)
        };
        self.shared.changed.notify_all();
        info!(time, %state, "playback toggled");
        match state {
            PlayState::Paused => self.notify(|o| o.on_paused(time)),
            _                 => self.notify(|o| o.on_resumed(time)),
        }
        Ok(())
    }

    /// Request the tick loop, or manual stepping, to stop.  Takes effect
    /// after the tick in progress (if any) completes.  Idempotent.
    pub fn stop(&self) {
        let was = {
            let mut control = lock(&self.shared.control);
            control.stop_requested = true;
            std::mem::replace(&mut control.state, PlayState::Stopped)
        };
        self.shared.changed.notify_all();
        if was != PlayState::Stopped {
            debug!(from = %was, "stop requested");
        }
    }

    /// Execute exactly one tick while stopped.
    ///
    /// Useful for tests and incremental stepping.  Fails with
    /// [`SimError::UnsupportedOperation`] while a run is active.
    pub fn tick(&self) -> SimResult<()> {
        self.run_ticks(1)
    }

    /// Execute up to `n` ticks while stopped.  Ends early at the first
    /// listener error or when [`stop`][Self::stop] is called.
    pub fn run_ticks(&self, n: u64) -> SimResult<()> {
        {
            let mut control = lock(&self.shared.control);
            Self::check_idle(&control, "manual ticking")?;
            control.busy = true;
            control.stop_requested = false;
        }
        let _guard = BusyGuard { sim: self, run: false };
        for done in 0..n {
            if lock(&self.shared.control).stop_requested {
                debug!(done, requested = n, "manual ticking stopped");
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    fn check_idle(control: &Control, what: &str) -> SimResult<()> {
        if control.busy {
            return Err(SimError::UnsupportedOperation(format!(
                "{what} while a run is still in progress (simulator is {})",
                control.state
            )));
        }
        if control.state != PlayState::Stopped {
            return Err(SimError::UnsupportedOperation(format!(
                "{what} while the simulator is {}",
                control.state
            )));
        }
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    fn run_loop(&self) -> SimResult<()> {
        loop {
            {
                let mut control = lock(&self.shared.control);
                while control.state == PlayState::Paused {
                    control = self
                        .shared
                        .changed
                        .wait(control)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                if control.state == PlayState::Stopped {
                    return Ok(());
                }
            }
            self.step()?;
        }
    }

    /// One tick: notify the listener snapshot, then advance the clock.
    fn step(&self) -> SimResult<()> {
        let lapse = TimeLapse::new(self.current_time(), self.shared.time_step);
        let listeners = lock(&self.shared.registry).snapshot();
        trace!(time = lapse.time(), listeners = listeners.len(), "tick");

        let fail = |source| SimError::Listener { time: lapse.time(), source };
        for listener in &listeners {
            listener.tick(&lapse).map_err(fail)?;
        }
        for listener in &listeners {
            listener.after_tick(&lapse).map_err(fail)?;
        }

        lock(&self.shared.control).time = lapse.end_time();
        self.notify(|o| o.on_tick_end(&lapse));
        Ok(())
    }

    fn notify(&self, f: impl Fn(&dyn SimObserver)) {
        let observers = lock(&self.shared.observers).clone();
        for observer in &observers {
            f(observer.as_ref());
        }
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("time", &self.current_time())
            .field("time_step", &self.shared.time_step)
            .field("state", &self.state())
            .field("models", &self.shared.models.len())
            .finish_non_exhaustive()
    }
}
