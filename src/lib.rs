//! University course timetabling by evolutionary search.
//!
//! Assigns course classes to `(day, hour, room)` slots so that rooms do not
//! overlap, rooms have enough seats and the required lab equipment, and no
//! professor or student group is booked twice at the same time.
//!
//! - **Models**: Professors, courses, student groups, rooms and classes,
//!   assembled into a validated [`Configuration`](models::Configuration).
//! - **Schedule**: The [`Schedule`] chromosome with its slot grid,
//!   fitness evaluation, crossover and mutation.
//! - **GA**: A generic [`Engine`](ga::Engine) running pluggable
//!   [`Strategy`](ga::Strategy) implementations such as
//!   [`NsgaII`](ga::NsgaII) over any [`Chromosome`](ga::Chromosome).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_timetable::ga::{Engine, NsgaII, RunConfig};
//! use u_timetable::models::{ClassSpec, Configuration, Course, Professor, StudentsGroup};
//! use u_timetable::Schedule;
//!
//! let mut configuration = Configuration::new();
//! configuration.add_professor(Professor::new(1, "Ada"));
//! configuration.add_course(Course::new(1, "Algorithms"));
//! configuration.add_course(Course::new(2, "Networks Lab"));
//! configuration.add_group(StudentsGroup::new(1, "CS-1", 18));
//! configuration.add_room("A101", false, 30);
//! configuration.add_room("L1", true, 20);
//! configuration.add_class(ClassSpec::new(1, 1).with_group(1).with_duration(2))?;
//! configuration.add_class(ClassSpec::new(1, 2).with_group(1).with_lab(true))?;
//!
//! let prototype = Schedule::new(Arc::new(configuration))?;
//! let config = RunConfig::fast().with_seed(42);
//! let result = Engine::run(&prototype, &mut NsgaII::new(), &config)?;
//!
//! let report = result.best.report();
//! assert_eq!(report.classes.len(), 2);
//! # Ok::<(), u_timetable::TimetableError>(())
//! ```

pub mod error;
pub mod ga;
pub mod models;
pub mod random;
pub mod schedule;

pub use error::{Result, TimetableError};
pub use schedule::{Schedule, ScheduleReport};
