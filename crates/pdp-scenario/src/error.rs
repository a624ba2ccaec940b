use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    /// No pickup can start early enough to deliver before `end_time`.
    #[error(
        "no feasible time window: arrival at {arrival_time}, needs {required} ms of \
         service and travel, horizon ends at {end_time}"
    )]
    InfeasibleTimeWindow {
        arrival_time: u64,
        required:     u64,
        end_time:     u64,
    },

    #[error("time window end {end} precedes begin {begin}")]
    InvalidTimeWindow { begin: u64, end: u64 },

    #[error("parcel is missing its {0}")]
    MissingField(&'static str),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
