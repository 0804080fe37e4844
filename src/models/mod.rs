//! Timetabling domain model.
//!
//! Entities are plain records, immutable once registered in a
//! [`Configuration`]. Professors, courses and student groups are keyed by
//! caller-chosen integer ids; rooms and classes receive sequential ids in
//! registration order.
//!
//! The time axis is fixed: [`DAYS_NUM`] teaching days of [`DAY_HOURS`]
//! one-hour periods each.

mod configuration;
mod course_class;
mod entities;

pub use configuration::{ClassSpec, Configuration};
pub use course_class::CourseClass;
pub use entities::{Course, Professor, Room, StudentsGroup};

/// Number of teaching days in a week.
pub const DAYS_NUM: usize = 5;

/// Number of one-hour periods in a teaching day.
pub const DAY_HOURS: usize = 12;
