//! Lifecycle observer trait for progress reporting and data collection.

use pdp_core::TimeLapse;

/// Callbacks invoked by the [`Simulator`][crate::Simulator] on state
/// transitions.
///
/// Observers are informational only: they can not fail, and they are called
/// with no simulator lock held.  All methods have default no-op
/// implementations so implementors only override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&self, lapse: &TimeLapse) {
///         if lapse.time() % self.interval == 0 {
///             println!("t = {}", lapse.time());
///         }
///     }
/// }
/// ```
pub trait SimObserver: Send + Sync {
    /// A run has started at `time`.
    fn on_started(&self, _time: u64) {}

    /// Playback was paused.  `time` is the clock at the moment of the toggle.
    fn on_paused(&self, _time: u64) {}

    /// Playback was resumed.
    fn on_resumed(&self, _time: u64) {}

    /// A run has ended (stopped, or aborted by a failing or panicking
    /// listener).
    fn on_stopped(&self, _time: u64) {}

    /// Called after every completed tick, once time has advanced.
    fn on_tick_end(&self, _time_lapse: &TimeLapse) {}
}
