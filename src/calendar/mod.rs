//! Calendar date arithmetic, view state and input validation.

mod calendar_math;
mod calendar_validation;
mod calendar_view;

pub use calendar_math::*;
pub use calendar_validation::*;
pub use calendar_view::*;

/// Custom error type for calendar operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Invalid date/time format: {0}")]
    InvalidDateTime(String),
    #[error("Event '{0}' not found")]
    EventNotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
