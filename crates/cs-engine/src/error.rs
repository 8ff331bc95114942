use cs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A wake-up was requested before the current clock reading, or at a
    /// non-finite time.  Always a logic defect in the calling process.
    #[error("cannot schedule a wake-up at {requested} (clock is at {now})")]
    InvalidSchedule {
        requested: f64,
        now:       f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
