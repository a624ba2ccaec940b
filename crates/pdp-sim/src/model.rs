//! The `Model` trait: the build-time extension point of the kernel.

use std::sync::Arc;

use crate::{SimObject, SimulatorUser, TickListener};

/// A plugin that claims registered objects of the type it manages.
///
/// Models are created by the factories passed to
/// [`SimulatorBuilder::add_model`][crate::SimulatorBuilder::add_model] and
/// live for the whole lifetime of the simulator.  The set of models can not
/// change after build.
///
/// Every object passed to [`Simulator::register`][crate::Simulator::register]
/// is offered to every model in registry order.  A model claims an object by
/// returning `true`; several models may claim the same object.  Objects no
/// model claims are still tracked.
///
/// # Example
///
/// ```rust,ignore
/// struct ParcelModel { parcels: Mutex<Vec<Arc<Parcel>>> }
///
/// impl Model for ParcelModel {
///     fn register(&self, object: &Arc<dyn SimObject>) -> bool {
///         match downcast_object::<Parcel>(object) {
///             Some(p) => { self.parcels.lock().unwrap().push(p); true }
///             None    => false,
///         }
///     }
///
///     fn unregister(&self, object: &Arc<dyn SimObject>) -> bool {
///         // …
///     }
/// }
/// ```
///
/// Model hooks are called without any simulator lock held, so they may query
/// the simulator freely.
///
/// A type that implements both `Model` and [`SimObject`] is only recognised
/// as a model when its [`SimObject::as_model`] returns `Some(self)`.  With
/// the default `None`, `register` treats it as a plain object and tracks it.
pub trait Model: Send + Sync + 'static {
    /// Human-readable name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Offer `object` to this model.  Returns `true` if the model claims it.
    fn register(&self, object: &Arc<dyn SimObject>) -> bool;

    /// Release `object`.  Only called for objects this model claimed.
    /// Returns `true` if the model was still holding it.
    fn unregister(&self, object: &Arc<dyn SimObject>) -> bool;

    /// `Some(self)` if the model itself wants per-tick notification.  Such
    /// models are notified before any dynamically registered listener.
    fn as_tick_listener(self: Arc<Self>) -> Option<Arc<dyn TickListener>> {
        None
    }

    /// `Some(self)` if the model wants a [`SimulatorApi`][crate::SimulatorApi]
    /// handle.  Injected once, at build time.
    fn as_simulator_user(self: Arc<Self>) -> Option<Arc<dyn SimulatorUser>> {
        None
    }
}
