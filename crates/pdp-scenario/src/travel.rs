//! The travel-time oracle consumed by time-window generation.

use pdp_core::Point;

use crate::{ScenarioError, ScenarioResult};

/// Answers shortest-travel-time queries between two points.
///
/// Scenario generation treats the road network (or whatever the space is)
/// as opaque; this is the only question it asks of it.
pub trait TravelModel: Send + Sync {
    /// Shortest travel time from `from` to `to`, in milliseconds.
    fn shortest_travel_time(&self, from: Point, to: Point) -> u64;
}

/// Straight-line travel at constant speed.
///
/// Coordinates are read as kilometres.  Travel times are rounded up to the
/// next millisecond so a vehicle is never scheduled to arrive early.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EuclideanTravelModel {
    speed_kmh: f64,
}

impl EuclideanTravelModel {
    pub fn new(speed_kmh: f64) -> ScenarioResult<Self> {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Err(ScenarioError::Config(format!(
                "travel speed must be positive and finite, got {speed_kmh}"
            )));
        }
        Ok(Self { speed_kmh })
    }

    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl TravelModel for EuclideanTravelModel {
    fn shortest_travel_time(&self, from: Point, to: Point) -> u64 {
        const MS_PER_HOUR: f64 = 3_600_000.0;
        (from.distance(to) / self.speed_kmh * MS_PER_HOUR).ceil() as u64
    }
}
