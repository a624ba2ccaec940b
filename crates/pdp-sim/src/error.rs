use thiserror::Error;

/// Boxed error returned by listener and user callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Missing or invalid builder settings.  Only ever returned by
    /// [`SimulatorBuilder::build`][crate::SimulatorBuilder::build].
    #[error("simulator configuration error: {0}")]
    Config(String),

    /// The operation is structurally disallowed (registering a model after
    /// build, toggling playback while stopped, …).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The operation was called with the wrong kind of object.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("object is already registered: {0}")]
    AlreadyRegistered(String),

    /// A tick listener failed.  The run that was executing is aborted.
    #[error("tick listener failed at time {time}: {source}")]
    Listener {
        time:   u64,
        #[source]
        source: CallbackError,
    },

    /// A [`SimulatorApi`][crate::SimulatorApi] handle outlived its simulator.
    #[error("simulator has been dropped")]
    Detached,
}

impl SimError {
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, SimError::UnsupportedOperation(_))
    }

    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SimError::InvalidArgument(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
