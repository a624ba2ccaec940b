//! `pdp-core`: foundational types for the `pdp` simulation kernel.
//!
//! This crate is a dependency of every other `pdp-*` crate.  It has no
//! `pdp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`geo`]     | `Point`, euclidean distance                               |
//! | [`time`]    | `TimeUnit`, `TimeLapse`, tick-length conversion           |
//! | [`rng`]     | `SimRng`, the seedable random stream                      |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use rng::SimRng;
pub use time::{TimeLapse, TimeUnit};
