//! Crate-wide error type.
//!
//! Errors are raised while a problem instance or run configuration is
//! assembled, before any [`Schedule`](crate::schedule::Schedule) exists.
//! Once a run has started the engine has no error paths: broken grid/map
//! invariants are programming defects and panic.

use thiserror::Error;

/// Errors produced while building a [`Configuration`](crate::models::Configuration)
/// or validating a [`RunConfig`](crate::ga::RunConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    /// A class references a professor id that was never registered.
    #[error("class references unknown professor {id}")]
    UnknownProfessor { id: u32 },

    /// A class references a course id that was never registered.
    #[error("class references unknown course {id}")]
    UnknownCourse { id: u32 },

    /// A class references a student group id that was never registered.
    #[error("class references unknown student group {id}")]
    UnknownGroup { id: u32 },

    /// Class duration does not fit into a teaching day.
    #[error("class duration {duration}h outside 1..={max}h")]
    InvalidDuration { duration: usize, max: usize },

    /// The combined size of a class's groups does not fit in a seat count.
    #[error("class groups {groups:?} exceed the seat count range")]
    SeatOverflow { groups: Vec<u32> },

    /// The instance cannot be scheduled (no rooms or no classes).
    #[error("configuration has no {what}")]
    EmptyConfiguration { what: &'static str },

    /// A run parameter is out of range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },
}

/// Result alias for fallible timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

impl TimetableError {
    /// Creates an invalid parameter error.
    pub fn parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TimetableError::UnknownProfessor { id: 7 };
        assert_eq!(err.to_string(), "class references unknown professor 7");

        let err = TimetableError::InvalidDuration {
            duration: 13,
            max: 12,
        };
        assert_eq!(err.to_string(), "class duration 13h outside 1..=12h");

        let err = TimetableError::SeatOverflow { groups: vec![1, 2] };
        assert_eq!(err.to_string(), "class groups [1, 2] exceed the seat count range");

        let err = TimetableError::parameter("population_size", "must be at least 2");
        assert_eq!(
            err.to_string(),
            "invalid parameter `population_size`: must be at least 2"
        );
    }
}
