//! Fluent builder for constructing a [`Simulator`].

use std::sync::{Arc, Condvar, Mutex};

use pdp_core::{SimRng, TimeUnit};
use tracing::info;

use crate::object::object_key;
use crate::sim::{Control, Registry, Shared};
use crate::{Model, SimError, SimObserver, SimResult, Simulator};

type ModelFactory = Box<dyn FnOnce() -> Arc<dyn Model>>;

// ── SimulatorConfig ───────────────────────────────────────────────────────────

/// Plain-data simulator settings.
///
/// Typically loaded from a TOML/JSON file by the application crate and fed to
/// [`SimulatorBuilder::from_config`].  Models and observers are code, so they
/// are added on the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorConfig {
    /// Seed for the simulator's random source.
    pub seed: u64,

    /// Length of one tick, in `time_unit`.
    pub tick_length: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub time_unit: TimeUnit,
}

// ── SimulatorBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Simulator`].
///
/// # Required inputs
///
/// | Method                              | Meaning                            |
/// |-------------------------------------|------------------------------------|
/// | `.seed(s)` or `.random_source(r)`   | the simulator's random source      |
/// | `.tick_length(n)`                   | tick length in `time_unit`         |
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                 |
/// |---------------------|-------------------------|
/// | `.time_unit(u)`     | `TimeUnit::Millisecond` |
/// | `.add_model(f)`     | no models               |
/// | `.observer(o)`      | no observers            |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimulatorBuilder::new()
///     .seed(123)
///     .tick_length(1)
///     .time_unit(TimeUnit::Second)
///     .add_model(|| Arc::new(ParcelModel::default()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct SimulatorBuilder {
    rng:         Option<SimRng>,
    tick_length: Option<u64>,
    time_unit:   TimeUnit,
    factories:   Vec<ModelFactory>,
    observers:   Vec<Arc<dyn SimObserver>>,
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the seed, tick length, and unit of `config`.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::new()
            .seed(config.seed)
            .tick_length(config.tick_length)
            .time_unit(config.time_unit)
    }

    /// Use a fresh [`SimRng`] seeded with `seed` as the random source.
    pub fn seed(self, seed: u64) -> Self {
        self.random_source(SimRng::new(seed))
    }

    pub fn random_source(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn tick_length(mut self, length: u64) -> Self {
        self.tick_length = Some(length);
        self
    }

    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    /// Append a model factory.  Factories run exactly once, during
    /// [`build`][Self::build], in the order they were added; that order is
    /// the model registry order.
    pub fn add_model<M, F>(mut self, factory: F) -> Self
    where
        M: Model,
        F: FnOnce() -> Arc<M> + 'static,
    {
        self.factories.push(Box::new(move || factory() as Arc<dyn Model>));
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Validate the configuration, instantiate the models, and return a
    /// stopped simulator at time 0.
    pub fn build(self) -> SimResult<Simulator> {
        let rng = self
            .rng
            .ok_or_else(|| SimError::Config("random source not set".into()))?;
        let tick_length = self
            .tick_length
            .ok_or_else(|| SimError::Config("tick length not set".into()))?;
        let time_step = self
            .time_unit
            .to_internal(tick_length)
            .map_err(|e| SimError::Config(e.to_string()))?;

        let models: Vec<Arc<dyn Model>> = self.factories.into_iter().map(|f| f()).collect();

        // Listening models are notified first, in registry order.
        let mut registry = Registry::default();
        for model in &models {
            if let Some(listener) = Arc::clone(model).as_tick_listener() {
                registry.push_listener(object_key(model), listener);
            }
        }

        let shared = Arc::new(Shared {
            models,
            time_step,
            time_unit: self.time_unit,
            control:   Mutex::new(Control::new()),
            changed:   Condvar::new(),
            registry:  Mutex::new(registry),
            observers: Mutex::new(self.observers),
            rng:       Mutex::new(rng),
        });
        let sim = Simulator::from_shared(shared);

        for model in sim.models() {
            if let Some(user) = Arc::clone(model).as_simulator_user() {
                user.set_simulator(sim.api());
            }
        }

        info!(
            models = sim.models().len(),
            tick_length,
            time_unit = %sim.time_unit(),
            time_step,
            "simulator built"
        );
        Ok(sim)
    }
}
