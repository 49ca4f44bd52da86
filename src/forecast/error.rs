use crate::types::target::Target;
use crate::types::traits::types::Month;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Not enough monthly history for {target}: {found} rows, need {required}")]
    InsufficientHistory {
        target: Target,
        required: usize,
        found: usize,
    },

    #[error("Not enough data points for {target}: {found} rows, need {required}")]
    InsufficientDataPoints {
        target: Target,
        required: usize,
        found: usize,
    },

    #[error("Cannot predict after {0}: month must be between 1 and 12")]
    InvalidMonth(Month),
}
