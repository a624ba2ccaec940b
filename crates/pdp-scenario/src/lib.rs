//! `pdp-scenario`: deterministic generation of pickup-and-delivery
//! scenarios.
//!
//! A scenario is a list of [`AddParcelEvent`]s ordered by time.  The
//! [`DefaultParcelGenerator`] composes independent sub-generators, one per
//! parcel attribute, and feeds each a sub-seed drawn from a single master
//! seed (see [`parcels`] for the exact order).
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`time_series`]  | arrival-time processes (Poisson, uniform)             |
//! | [`locations`]    | point generators over a rectangle                     |
//! | [`values`]       | constant / uniform single-value samplers              |
//! | [`time_windows`] | feasible pickup and delivery windows                  |
//! | [`travel`]       | `TravelModel`, the travel-time oracle                 |
//! | [`parcel`]       | `ParcelDto`, `TimeWindow`, `AddParcelEvent`           |
//! | [`parcels`]      | `ParcelGenerator`, `DefaultParcelGenerator`, builder  |
//!
//! ```rust,ignore
//! let generator = DefaultParcelGenerator::builder()
//!     .arrival_times(time_series::homogeneous_poisson(14_400_000.0, 20.0)?)
//!     .locations(LocationsBuilder::new().square(5.0).uniform()?)
//!     .build();
//! let travel = EuclideanTravelModel::new(50.0)?;
//! let events = generator.generate(123, &travel, 28_800_000)?;
//! ```

pub mod error;
pub mod locations;
pub mod parcel;
pub mod parcels;
pub mod time_series;
pub mod time_windows;
pub mod travel;
pub mod values;


pub use error::{ScenarioError, ScenarioResult};
pub use locations::{LocationGenerator, LocationsBuilder, UniformLocations};
pub use parcel::{AddParcelEvent, ParcelDto, ParcelDtoBuilder, TimeWindow};
pub use parcels::{
    round_half_down, DefaultParcelGenerator, ParcelGenerator, ParcelGeneratorBuilder,
};
pub use time_series::{PoissonProcess, TimeSeriesGenerator, UniformTimes};
pub use time_windows::{DefaultTimeWindows, TimeWindowGenerator, TimeWindowsBuilder};
pub use travel::{EuclideanTravelModel, TravelModel};
pub use values::ValueGenerator;
