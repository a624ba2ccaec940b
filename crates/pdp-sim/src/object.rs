//! Capability traits for objects tracked by the [`Simulator`][crate::Simulator].
//!
//! Any type can be registered once it implements [`SimObject`].  The empty
//! impl is enough for a plain domain object:
//!
//! ```rust,ignore
//! struct Depot;
//! impl SimObject for Depot {}
//! ```
//!
//! Roles are opted into by overriding the capability accessors, each of which
//! hands back `self` as the matching trait object:
//!
//! ```rust,ignore
//! struct Truck { /* … */ }
//!
//! impl TickListener for Truck {
//!     fn tick(&self, lapse: &TimeLapse) -> ListenerResult { Ok(()) }
//! }
//!
//! impl SimObject for Truck {
//!     fn as_tick_listener(self: Arc<Self>) -> Option<Arc<dyn TickListener>> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! The simulator queries every capability once, at registration, and records
//! the answers so unregistration undoes exactly what registration did.

use std::any::Any;
use std::sync::Arc;

use pdp_core::TimeLapse;

use crate::{CallbackError, Model, SimulatorApi};

/// Result of a [`TickListener`] callback.  An `Err` aborts the current run.
pub type ListenerResult = Result<(), CallbackError>;

// ── AsAny ─────────────────────────────────────────────────────────────────────

/// Upcast to `Any` so models can downcast registered objects to the concrete
/// type they manage.  Implemented for every `Send + Sync + 'static` type.
pub trait AsAny: Any + Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

// ── SimObject ─────────────────────────────────────────────────────────────────

/// An object that can be registered with a simulator.
pub trait SimObject: AsAny {
    /// `Some(self)` if this object wants per-tick notification.
    fn as_tick_listener(self: Arc<Self>) -> Option<Arc<dyn TickListener>> {
        None
    }

    /// `Some(self)` if this object wants a [`SimulatorApi`] handle.
    fn as_simulator_user(self: Arc<Self>) -> Option<Arc<dyn SimulatorUser>> {
        None
    }

    /// `Some(self)` if this object is itself a [`Model`].  Such objects are
    /// rejected by `register` and `unregister`.
    ///
    /// Not detected automatically: a [`Model`] that is also a `SimObject`
    /// must override this to be rejected.
    fn as_model(self: Arc<Self>) -> Option<Arc<dyn Model>> {
        None
    }
}

/// Downcast a registered object to the concrete type `T`.
///
/// Returns `None` if `object` is not a `T`.  This is how a [`Model`] checks
/// whether an offered object is of its managed type.
pub fn downcast_object<T: SimObject>(object: &Arc<dyn SimObject>) -> Option<Arc<T>> {
    <dyn SimObject as AsAny>::into_any(Arc::clone(object))
        .downcast::<T>()
        .ok()
}

/// Identity of a registered object: the address of its shared allocation.
///
/// Stable for as long as the simulator holds a clone of the `Arc`.
#[inline]
pub(crate) fn object_key<T: ?Sized>(object: &Arc<T>) -> usize {
    Arc::as_ptr(object).cast::<()>() as usize
}

// ── TickListener ──────────────────────────────────────────────────────────────

/// Per-tick notification.
///
/// Within one tick the simulator calls `tick` on every listener in
/// registration order, then `after_tick` on every listener in the same order,
/// then advances time.  Both passes use the listener list as it was when the
/// tick began.
pub trait TickListener: Send + Sync {
    fn tick(&self, time_lapse: &TimeLapse) -> ListenerResult;

    /// Default: does nothing.
    fn after_tick(&self, _time_lapse: &TimeLapse) -> ListenerResult {
        Ok(())
    }
}

// ── SimulatorUser ─────────────────────────────────────────────────────────────

/// Receives a handle to the simulator's public API on registration.
pub trait SimulatorUser: Send + Sync {
    fn set_simulator(&self, api: SimulatorApi);
}
