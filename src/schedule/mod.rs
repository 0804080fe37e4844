//! Timetable chromosome.
//!
//! A [`Schedule`] places every class of a [`Configuration`](crate::models::Configuration)
//! at one [`Reservation`] and keeps a flat slot grid for constant-time
//! overlap queries. It evaluates its own fitness and the five per-class
//! [`Criterion`] flags after every structural change.
//!
//! # Encoding
//!
//! The grid has `DAYS_NUM · DAY_HOURS · rooms` cells laid out day-major,
//! then room, then hour. A class of duration `d` occupies `d` consecutive
//! cells starting at its reservation index.
//!
//! # Fitness
//!
//! Classes are scored in configuration order against a running score:
//! room overlap, professor overlap and group overlap reset it to zero on
//! violation; seat and lab violations halve it; every satisfied check adds
//! one. Fitness is the final score over `classes · 5`.

mod chromosome;
mod criteria;
mod positions;
mod report;
mod reservation;

pub use chromosome::Schedule;
pub use criteria::{Criterion, CRITERIA_COUNT};
pub use positions::POSITIONS_PER_CLASS;
pub use report::{ClassPlacement, ScheduleReport};
pub use reservation::Reservation;
