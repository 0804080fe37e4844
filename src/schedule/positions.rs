//! Real-valued position encoding for swarm-style strategies.
//!
//! Each class maps to three consecutive reals `(day, room, time)`.
//! Extracting writes the current placements; updating reads arbitrary
//! reals, wraps them into valid ranges, rebuilds the grid and writes the
//! normalized values back so the caller's buffer stays in sync.

use std::sync::Arc;

use super::chromosome::Schedule;
use super::reservation::Reservation;
use crate::models::{DAYS_NUM, DAY_HOURS};

/// Reals per class in a position vector.
pub const POSITIONS_PER_CLASS: usize = 3;

fn wrap(value: f32, modulus: usize) -> usize {
    // NaN and infinities land on 0
    let v = value.abs().round();
    if v.is_finite() {
        (v as usize) % modulus
    } else {
        0
    }
}

impl Schedule {
    /// Length of the position vector for this configuration.
    pub fn position_len(&self) -> usize {
        self.configuration().number_of_course_classes() * POSITIONS_PER_CLASS
    }

    /// Writes the placements into `positions`.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is shorter than [`position_len`](Self::position_len).
    pub fn extract_positions(&self, positions: &mut [f32]) {
        assert!(positions.len() >= self.position_len(), "position buffer too short");
        for (chunk, r) in positions
            .chunks_exact_mut(POSITIONS_PER_CLASS)
            .zip(self.reservations())
        {
            chunk[0] = r.day() as f32;
            chunk[1] = r.room() as f32;
            chunk[2] = r.time() as f32;
        }
    }

    /// Rebuilds all placements from `positions` and re-evaluates fitness.
    ///
    /// Works on prototypes too, turning them into populated schedules.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is shorter than [`position_len`](Self::position_len).
    pub fn update_positions(&mut self, positions: &mut [f32]) {
        assert!(positions.len() >= self.position_len(), "position buffer too short");
        let configuration = Arc::clone(self.configuration_arc());
        let rooms = configuration.number_of_rooms();

        self.clear();
        for (class, chunk) in configuration
            .course_classes()
            .iter()
            .zip(positions.chunks_exact_mut(POSITIONS_PER_CLASS))
        {
            let day = wrap(chunk[0], DAYS_NUM);
            let room = wrap(chunk[1], rooms);
            let time = wrap(chunk[2], DAY_HOURS + 1 - class.duration());
            chunk[0] = day as f32;
            chunk[1] = room as f32;
            chunk[2] = time as f32;
            self.place(class, Reservation::new(day, time, room));
        }

        debug_assert!(self.is_consistent());
        self.calculate_fitness();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::schedule::fixtures;

    #[test]
    fn test_extract_then_update_restores_schedule() {
        let proto = Schedule::new(fixtures::campus()).unwrap();
        let mut rng = create_rng(3);
        let original = proto.make_new_from_prototype(&mut rng);

        let mut positions = vec![0.0f32; original.position_len()];
        original.extract_positions(&mut positions);

        let mut rebuilt = proto.clone();
        rebuilt.update_positions(&mut positions);
        assert_eq!(rebuilt.reservations(), original.reservations());
        assert_eq!(rebuilt.fitness(), original.fitness());
        assert!(rebuilt.is_consistent());
    }

    #[test]
    fn test_update_wraps_out_of_range_values() {
        let proto = Schedule::new(fixtures::two_room()).unwrap();
        let mut positions = vec![-7.4f32, 3.0, 30.0, f32::NAN, 1.6, 11.0];
        let mut s = proto.clone();
        s.update_positions(&mut positions);

        assert_eq!(s.reservation(0), Some(Reservation::new(2, 6, 1)));
        assert_eq!(s.reservation(1), Some(Reservation::new(0, 11, 0)));
        assert_eq!(positions, vec![2.0, 1.0, 6.0, 0.0, 0.0, 11.0]);
        assert!(s.is_consistent());
    }

    #[test]
    fn test_update_replaces_previous_placements() {
        let proto = Schedule::new(fixtures::two_room()).unwrap();
        let mut rng = create_rng(5);
        let mut s = proto.make_new_from_prototype(&mut rng);
        let mut positions = vec![0.0f32, 0.0, 0.0, 0.0, 1.0, 1.0];
        s.update_positions(&mut positions);
        assert_eq!(s.reservations().len(), 2);
        assert!((s.fitness() - 1.0).abs() < 1e-12);
    }
}
