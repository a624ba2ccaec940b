//! `pdp-sim`: the tick scheduler and registration protocol of the pdp
//! simulation kernel.
//!
//! # Tick loop
//!
//! ```text
//! start():
//!   while state != Stopped:
//!     Paused  → wait until toggled or stopped
//!     Playing → ① snapshot tick listeners
//!               ② tick(lapse)        on each listener, in registration order
//!               ③ after_tick(lapse)  on each listener, same order
//!               ④ time += time_step
//! ```
//!
//! # Roles
//!
//! | Trait            | Role                                                  |
//! |------------------|-------------------------------------------------------|
//! | [`Model`]        | build-time plugin; claims objects of its managed type |
//! | [`SimObject`]    | anything registrable; declares its capabilities       |
//! | [`TickListener`] | per-tick and after-tick notification                  |
//! | [`SimulatorUser`]| receives a [`SimulatorApi`] handle on registration    |
//! | [`SimObserver`]  | informational lifecycle events                        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pdp_core::TimeUnit;
//! use pdp_sim::SimulatorBuilder;
//!
//! let sim = SimulatorBuilder::new()
//!     .seed(123)
//!     .tick_length(1)
//!     .time_unit(TimeUnit::Second)
//!     .build()?;
//! sim.register(Arc::new(MyListener::default()))?;
//! std::thread::spawn({ let sim = sim.clone(); move || sim.start() });
//! ```

pub mod api;
pub mod builder;
pub mod error;
pub mod model;
pub mod object;
pub mod observer;
pub mod sim;


pub use api::SimulatorApi;
pub use builder::{SimulatorBuilder, SimulatorConfig};
pub use error::{CallbackError, SimError, SimResult};
pub use model::Model;
pub use object::{downcast_object, ListenerResult, SimObject, SimulatorUser, TickListener};
pub use observer::SimObserver;
pub use sim::{PlayState, RegistrationInfo, Simulator};
