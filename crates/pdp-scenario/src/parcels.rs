//! Parcel scenario composition.
//!
//! # Seed fan-out
//!
//! ```text
//! master = SimRng::new(seed)
//! arrival times ← master.next_seed()
//! locations     ← master.next_seed()     (2 per event: origin, destination)
//! per event, in arrival order:
//!   pickup duration   ← master.next_seed()
//!   delivery duration ← master.next_seed()
//!   needed capacity   ← master.next_seed()
//!   time windows      ← master.next_seed()
//! ```
//!
//! Every sub-generator receives its own seed, so swapping one of them for a
//! generator that draws a different number of values leaves the output of
//! all the others unchanged.

use std::sync::Arc;

use pdp_core::{Point, SimRng};
use tracing::debug;

use crate::locations::{LocationGenerator, UniformLocations};
use crate::parcel::{AddParcelEvent, ParcelDto};
use crate::time_series::{PoissonProcess, TimeSeriesGenerator};
use crate::time_windows::{DefaultTimeWindows, TimeWindowGenerator};
use crate::travel::TravelModel;
use crate::values::{self, ValueGenerator};
use crate::{ScenarioError, ScenarioResult};

/// Five minutes in milliseconds.
const DEFAULT_SERVICE_DURATION: u64 = 300_000;

/// Produces the timed add-parcel events of a scenario.
pub trait ParcelGenerator: Send + Sync {
    /// Events ordered by non-decreasing time, fully determined by `seed`.
    fn generate(
        &self,
        seed: u64,
        travel_model: &dyn TravelModel,
        end_time: u64,
    ) -> ScenarioResult<Vec<AddParcelEvent>>;

    fn center(&self) -> Point;
    fn min(&self) -> Point;
    fn max(&self) -> Point;
}

/// Rounds to the nearest integer, resolving exact halves toward zero.
/// Negative inputs clamp to zero.
pub fn round_half_down(x: f64) -> u64 {
    let floor = x.floor();
    let rounded = if x - floor > 0.5 { floor + 1.0 } else { floor };
    rounded.max(0.0) as u64
}

/// Composes one generator per parcel attribute.
#[derive(Clone)]
pub struct DefaultParcelGenerator {
    arrival_times:      Arc<dyn TimeSeriesGenerator>,
    locations:          Arc<dyn LocationGenerator>,
    time_windows:       Arc<dyn TimeWindowGenerator>,
    pickup_durations:   Arc<dyn ValueGenerator<u64>>,
    delivery_durations: Arc<dyn ValueGenerator<u64>>,
    needed_capacities:  Arc<dyn ValueGenerator<u32>>,
}

impl DefaultParcelGenerator {
    pub fn builder() -> ParcelGeneratorBuilder {
        ParcelGeneratorBuilder::default()
    }
}

impl std::fmt::Debug for DefaultParcelGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultParcelGenerator")
            .field("min", &self.locations.min())
            .field("max", &self.locations.max())
            .finish_non_exhaustive()
    }
}

impl ParcelGenerator for DefaultParcelGenerator {
    fn generate(
        &self,
        seed: u64,
        travel_model: &dyn TravelModel,
        end_time: u64,
    ) -> ScenarioResult<Vec<AddParcelEvent>> {
        let mut rng = SimRng::new(seed);
        let times = self.arrival_times.generate(rng.next_seed());
        let locations = self.locations.generate(rng.next_seed(), times.len() * 2);
        if locations.len() != times.len() * 2 {
            return Err(ScenarioError::Config(format!(
                "location generator returned {} points, expected {}",
                locations.len(),
                times.len() * 2
            )));
        }

        let mut events = Vec::with_capacity(times.len());
        for (&t, pair) in times.iter().zip(locations.chunks_exact(2)) {
            let mut parcel = ParcelDto::builder(pair[0], pair[1])
                .arrival_time(round_half_down(t))
                .pickup_duration(self.pickup_durations.get(rng.next_seed()))
                .delivery_duration(self.delivery_durations.get(rng.next_seed()))
                .needed_capacity(self.needed_capacities.get(rng.next_seed()));
            self.time_windows
                .generate(rng.next_seed(), &mut parcel, travel_model, end_time)?;
            events.push(AddParcelEvent::new(parcel.build()?));
        }

        debug!(seed, end_time, parcels = events.len(), "generated parcel scenario");
        Ok(events)
    }

    fn center(&self) -> Point {
        self.locations.center()
    }

    fn min(&self) -> Point {
        self.locations.min()
    }

    fn max(&self) -> Point {
        self.locations.max()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Every attribute has a default; see [`Default`] for the values.
#[derive(Clone)]
pub struct ParcelGeneratorBuilder {
    arrival_times:      Arc<dyn TimeSeriesGenerator>,
    locations:          Arc<dyn LocationGenerator>,
    time_windows:       Arc<dyn TimeWindowGenerator>,
    pickup_durations:   Arc<dyn ValueGenerator<u64>>,
    delivery_durations: Arc<dyn ValueGenerator<u64>>,
    needed_capacities:  Arc<dyn ValueGenerator<u32>>,
}

impl Default for ParcelGeneratorBuilder {
    /// Poisson arrivals (20 expected over four hours), uniform locations in a
    /// 5 x 5 square around the origin, five minute service at both ends, zero
    /// capacity, default time windows.
    fn default() -> Self {
        let service: Arc<dyn ValueGenerator<u64>> =
            Arc::new(values::constant(DEFAULT_SERVICE_DURATION));
        Self {
            arrival_times:      Arc::new(PoissonProcess::default()),
            locations:          Arc::new(UniformLocations::default()),
            time_windows:       Arc::new(DefaultTimeWindows::default()),
            pickup_durations:   Arc::clone(&service),
            delivery_durations: service,
            needed_capacities:  Arc::new(values::constant(0u32)),
        }
    }
}

impl ParcelGeneratorBuilder {
    pub fn arrival_times(mut self, g: impl TimeSeriesGenerator + 'static) -> Self {
        self.arrival_times = Arc::new(g);
        self
    }

    pub fn locations(mut self, g: impl LocationGenerator + 'static) -> Self {
        self.locations = Arc::new(g);
        self
    }

    pub fn time_windows(mut self, g: impl TimeWindowGenerator + 'static) -> Self {
        self.time_windows = Arc::new(g);
        self
    }

    pub fn pickup_durations(mut self, g: impl ValueGenerator<u64> + 'static) -> Self {
        self.pickup_durations = Arc::new(g);
        self
    }

    pub fn delivery_durations(mut self, g: impl ValueGenerator<u64> + 'static) -> Self {
        self.delivery_durations = Arc::new(g);
        self
    }

    /// Use the same generator for pickup and delivery durations.  Each still
    /// receives its own sub-seed.
    pub fn service_durations(mut self, g: impl ValueGenerator<u64> + 'static) -> Self {
        let g: Arc<dyn ValueGenerator<u64>> = Arc::new(g);
        self.pickup_durations = Arc::clone(&g);
        self.delivery_durations = g;
        self
    }

    pub fn needed_capacities(mut self, g: impl ValueGenerator<u32> + 'static) -> Self {
        self.needed_capacities = Arc::new(g);
        self
    }

    pub fn build(self) -> DefaultParcelGenerator {
        DefaultParcelGenerator {
            arrival_times:      self.arrival_times,
            locations:          self.locations,
            time_windows:       self.time_windows,
            pickup_durations:   self.pickup_durations,
            delivery_durations: self.delivery_durations,
            needed_capacities:  self.needed_capacities,
        }
    }
}
