//! Feasible pickup and delivery windows.

use std::sync::Arc;

use pdp_core::SimRng;
use tracing::trace;

use crate::parcel::{ParcelDtoBuilder, TimeWindow};
use crate::travel::TravelModel;
use crate::values::{self, ValueGenerator};
use crate::{ScenarioError, ScenarioResult};

const DEFAULT_PICKUP_WINDOW: u64 = 30 * 60 * 1000;
const DEFAULT_DELIVERY_WINDOW: u64 = 60 * 60 * 1000;

/// Assigns pickup and delivery windows to a partially built parcel.
///
/// Implementations read the parcel's arrival time, locations and service
/// durations and must leave it with windows under which the parcel can be
/// picked up, carried, and delivered before `end_time`.  If no such windows
/// exist they return [`ScenarioError::InfeasibleTimeWindow`] and leave the
/// parcel untouched.
pub trait TimeWindowGenerator: Send + Sync {
    fn generate(
        &self,
        seed: u64,
        parcel: &mut ParcelDtoBuilder,
        travel_model: &dyn TravelModel,
        end_time: u64,
    ) -> ScenarioResult<()>;
}

/// Windows of configurable length placed uniformly inside the feasible slack.
///
/// Draw order per parcel: pickup window length seed, pickup offset, delivery
/// window length seed, delivery offset.
#[derive(Clone)]
pub struct DefaultTimeWindows {
    pickup_length:   Arc<dyn ValueGenerator<u64>>,
    delivery_length: Arc<dyn ValueGenerator<u64>>,
}

impl DefaultTimeWindows {
    pub fn builder() -> TimeWindowsBuilder {
        TimeWindowsBuilder::default()
    }
}

impl Default for DefaultTimeWindows {
    fn default() -> Self {
        TimeWindowsBuilder::default().build()
    }
}

impl std::fmt::Debug for DefaultTimeWindows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTimeWindows").finish_non_exhaustive()
    }
}

impl TimeWindowGenerator for DefaultTimeWindows {
    fn generate(
        &self,
        seed: u64,
        parcel: &mut ParcelDtoBuilder,
        travel_model: &dyn TravelModel,
        end_time: u64,
    ) -> ScenarioResult<()> {
        let travel = travel_model.shortest_travel_time(parcel.origin, parcel.destination);
        // `None` when the durations overflow: no horizon can fit them.
        let required = parcel
            .pickup_duration
            .checked_add(travel)
            .and_then(|t| t.checked_add(parcel.delivery_duration));
        let arrival = parcel.arrival_time;

        let latest_pickup = required
            .and_then(|r| end_time.checked_sub(r))
            .filter(|&t| t >= arrival)
            .ok_or(ScenarioError::InfeasibleTimeWindow {
                arrival_time: arrival,
                required: required.unwrap_or(u64::MAX),
                end_time,
            })?;

        let mut rng = SimRng::new(seed);

        let slack = latest_pickup - arrival;
        let length = self.pickup_length.get(rng.next_seed()).min(slack);
        let begin = arrival + rng.gen_range(0..=slack - length);
        let pickup = TimeWindow::new(begin, begin + length)?;

        // `begin <= latest_pickup` keeps this interval non-empty, and
        // `required` fitting in u64 keeps the sums below from overflowing.
        let earliest_delivery = begin + parcel.pickup_duration + travel;
        let latest_delivery = end_time - parcel.delivery_duration;
        let slack = latest_delivery - earliest_delivery;
        let length = self.delivery_length.get(rng.next_seed()).min(slack);
        let begin = earliest_delivery + rng.gen_range(0..=slack - length);
        let delivery = TimeWindow::new(begin, begin + length)?;

        trace!(arrival, ?pickup, ?delivery, "assigned time windows");
        parcel.pickup_time_window = Some(pickup);
        parcel.delivery_time_window = Some(delivery);
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TimeWindowsBuilder {
    pickup_length:   Arc<dyn ValueGenerator<u64>>,
    delivery_length: Arc<dyn ValueGenerator<u64>>,
}

impl Default for TimeWindowsBuilder {
    /// 30 minute pickup windows, 60 minute delivery windows.
    fn default() -> Self {
        Self {
            pickup_length:   Arc::new(values::constant(DEFAULT_PICKUP_WINDOW)),
            delivery_length: Arc::new(values::constant(DEFAULT_DELIVERY_WINDOW)),
        }
    }
}

impl TimeWindowsBuilder {
    /// Requested pickup window length in milliseconds; clamped to the slack.
    pub fn pickup_window_length(mut self, g: impl ValueGenerator<u64> + 'static) -> Self {
        self.pickup_length = Arc::new(g);
        self
    }

    /// Requested delivery window length in milliseconds; clamped to the slack.
    pub fn delivery_window_length(mut self, g: impl ValueGenerator<u64> + 'static) -> Self {
        self.delivery_length = Arc::new(g);
        self
    }

    pub fn build(self) -> DefaultTimeWindows {
        DefaultTimeWindows {
            pickup_length:   self.pickup_length,
            delivery_length: self.delivery_length,
        }
    }
}
