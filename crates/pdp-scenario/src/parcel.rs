//! Scenario output records.

use pdp_core::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ScenarioError, ScenarioResult};

/// Closed interval `[begin, end]` in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    pub begin: u64,
    pub end:   u64,
}

impl TimeWindow {
    pub fn new(begin: u64, end: u64) -> ScenarioResult<Self> {
        if end < begin {
            return Err(ScenarioError::InvalidTimeWindow { begin, end });
        }
        Ok(Self { begin, end })
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.begin
    }

    #[inline]
    pub fn contains(&self, t: u64) -> bool {
        self.begin <= t && t <= self.end
    }
}

/// A pickup-and-delivery request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParcelDto {
    pub origin:               Point,
    pub destination:          Point,
    /// Time at which the request becomes known.
    pub arrival_time:         u64,
    pub pickup_duration:      u64,
    pub delivery_duration:    u64,
    pub needed_capacity:      u32,
    pub pickup_time_window:   TimeWindow,
    pub delivery_time_window: TimeWindow,
}

impl ParcelDto {
    pub fn builder(origin: Point, destination: Point) -> ParcelDtoBuilder {
        ParcelDtoBuilder {
            origin,
            destination,
            arrival_time: 0,
            pickup_duration: 0,
            delivery_duration: 0,
            needed_capacity: 0,
            pickup_time_window: None,
            delivery_time_window: None,
        }
    }
}

/// Partially specified parcel.  Both time windows must be set before
/// [`build`](Self::build).
#[derive(Clone, Debug, PartialEq)]
pub struct ParcelDtoBuilder {
    pub origin:               Point,
    pub destination:          Point,
    pub arrival_time:         u64,
    pub pickup_duration:      u64,
    pub delivery_duration:    u64,
    pub needed_capacity:      u32,
    pub pickup_time_window:   Option<TimeWindow>,
    pub delivery_time_window: Option<TimeWindow>,
}

impl ParcelDtoBuilder {
    pub fn arrival_time(mut self, t: u64) -> Self {
        self.arrival_time = t;
        self
    }

    pub fn pickup_duration(mut self, ms: u64) -> Self {
        self.pickup_duration = ms;
        self
    }

    pub fn delivery_duration(mut self, ms: u64) -> Self {
        self.delivery_duration = ms;
        self
    }

    pub fn needed_capacity(mut self, capacity: u32) -> Self {
        self.needed_capacity = capacity;
        self
    }

    pub fn pickup_time_window(mut self, tw: TimeWindow) -> Self {
        self.pickup_time_window = Some(tw);
        self
    }

    pub fn delivery_time_window(mut self, tw: TimeWindow) -> Self {
        self.delivery_time_window = Some(tw);
        self
    }

    pub fn build(self) -> ScenarioResult<ParcelDto> {
        Ok(ParcelDto {
            origin:               self.origin,
            destination:          self.destination,
            arrival_time:         self.arrival_time,
            pickup_duration:      self.pickup_duration,
            delivery_duration:    self.delivery_duration,
            needed_capacity:      self.needed_capacity,
            pickup_time_window:   self
                .pickup_time_window
                .ok_or(ScenarioError::MissingField("pickup time window"))?,
            delivery_time_window: self
                .delivery_time_window
                .ok_or(ScenarioError::MissingField("delivery time window"))?,
        })
    }
}

/// Scenario event: `parcel` enters the system at `time`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AddParcelEvent {
    pub time:   u64,
    pub parcel: ParcelDto,
}

impl AddParcelEvent {
    /// The event fires at the parcel's arrival time.
    pub fn new(parcel: ParcelDto) -> Self {
        Self { time: parcel.arrival_time, parcel }
    }
}
