//! Reservation: a class's placement in the time-space grid.

use rand::Rng;

use crate::models::{DAYS_NUM, DAY_HOURS};

/// Placement of a class: start hour `time` on `day` in `room`.
///
/// A reservation is a plain value; two reservations are equal when their
/// coordinates are. It maps bijectively to a flat slot index, see
/// [`index`](Self::index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservation {
    day: usize,
    time: usize,
    room: usize,
}

impl Reservation {
    /// Creates a reservation.
    pub fn new(day: usize, time: usize, room: usize) -> Self {
        debug_assert!(day < DAYS_NUM, "day {day} out of range");
        debug_assert!(time < DAY_HOURS, "time {time} out of range");
        Self { day, time, room }
    }

    /// Draws a uniformly random placement for a class of `duration` hours.
    ///
    /// The start hour is bounded so that the class ends within the day.
    pub fn random<R: Rng>(duration: usize, number_of_rooms: usize, rng: &mut R) -> Self {
        debug_assert!((1..=DAY_HOURS).contains(&duration));
        let day = rng.random_range(0..DAYS_NUM);
        let room = rng.random_range(0..number_of_rooms);
        let time = rng.random_range(0..=DAY_HOURS - duration);
        Self { day, time, room }
    }

    /// Day of the week, `0..DAYS_NUM`.
    pub fn day(&self) -> usize {
        self.day
    }

    /// Start hour within the day, `0..DAY_HOURS`.
    pub fn time(&self) -> usize {
        self.time
    }

    /// Room id.
    pub fn room(&self) -> usize {
        self.room
    }

    /// Flat slot index of the first hour:
    /// `day · rooms · DAY_HOURS + room · DAY_HOURS + time`.
    pub fn index(&self, number_of_rooms: usize) -> usize {
        self.day * number_of_rooms * DAY_HOURS + self.room * DAY_HOURS + self.time
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize, number_of_rooms: usize) -> Self {
        let day_size = number_of_rooms * DAY_HOURS;
        let day = index / day_size;
        let rest = index % day_size;
        Self {
            day,
            time: rest % DAY_HOURS,
            room: rest / DAY_HOURS,
        }
    }
}
