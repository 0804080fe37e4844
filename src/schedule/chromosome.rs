//! The [`Schedule`] chromosome: slot grid, class table, fitness.

use std::sync::Arc;

use rand::Rng;

use super::criteria::{Criterion, CRITERIA_COUNT};
use super::reservation::Reservation;
use crate::error::Result;
use crate::ga::Chromosome;
use crate::models::{Configuration, CourseClass, DAYS_NUM, DAY_HOURS};

/// One candidate timetable.
///
/// Holds a shared read-only [`Configuration`], the slot grid (class ids
/// per `(day, room, hour)` cell), one [`Reservation`] per class in
/// configuration order, the criteria flags and the scalar fitness.
///
/// A schedule built with [`Schedule::new`] is an empty *prototype*: it has
/// no placements and only serves to spawn populated schedules through
/// [`make_new_from_prototype`](Self::make_new_from_prototype).
///
/// # Invariant
///
/// For a populated schedule, class `c` appears in exactly the `duration`
/// cells starting at its reservation index and in no other cell.
#[derive(Debug, Clone)]
pub struct Schedule {
    configuration: Arc<Configuration>,
    slots: Vec<Vec<usize>>,
    reservations: Vec<Reservation>,
    criteria: Vec<bool>,
    fitness: f64,
}

impl Schedule {
    /// Creates an empty prototype for `configuration`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration has no rooms or no classes.
    pub fn new(configuration: Arc<Configuration>) -> Result<Self> {
        configuration.validate()?;
        Ok(Self::empty(configuration))
    }

    fn empty(configuration: Arc<Configuration>) -> Self {
        let cells = DAYS_NUM * DAY_HOURS * configuration.number_of_rooms();
        let classes = configuration.number_of_course_classes();
        Self {
            slots: vec![Vec::new(); cells],
            reservations: Vec::with_capacity(classes),
            criteria: vec![false; classes * CRITERIA_COUNT],
            fitness: 0.0,
            configuration,
        }
    }

    /// Creates a schedule with the same configuration and random placements.
    pub fn make_new_from_prototype<R: Rng>(&self, rng: &mut R) -> Schedule {
        let mut child = Self::empty(Arc::clone(&self.configuration));
        let rooms = self.configuration.number_of_rooms();
        for class in self.configuration.course_classes() {
            let reservation = Reservation::random(class.duration(), rooms, rng);
            child.place(class, reservation);
        }
        child.calculate_fitness();
        child
    }

    /// Creates a schedule with the same configuration and the given placements,
    /// one per class in configuration order.
    ///
    /// # Panics
    ///
    /// Panics if the number of reservations differs from the number of
    /// classes, or if a reservation does not fit the grid.
    pub fn with_reservations(&self, reservations: &[Reservation]) -> Schedule {
        let classes = self.configuration.course_classes();
        assert_eq!(
            reservations.len(),
            classes.len(),
            "one reservation per class required"
        );
        let mut child = Self::empty(Arc::clone(&self.configuration));
        for (class, &reservation) in classes.iter().zip(reservations) {
            assert!(
                reservation.room() < self.configuration.number_of_rooms()
                    && reservation.time() + class.duration() <= DAY_HOURS,
                "reservation {reservation:?} does not fit class {}",
                class.id()
            );
            child.place(class, reservation);
        }
        child.calculate_fitness();
        child
    }

    /// Recombines `self` with `mother`.
    ///
    /// With probability `1 − crossover_probability / 100` returns a copy of
    /// `self`. Otherwise picks `crossover_points` distinct cut points over
    /// the class list and builds a child by walking the classes in order,
    /// taking each placement from the current source parent and switching
    /// parent after every cut point.
    ///
    /// # Panics
    ///
    /// When crossover happens and either parent is a prototype, or the
    /// parents belong to different configurations.
    pub fn crossover<R: Rng>(
        &self,
        mother: &Schedule,
        crossover_points: usize,
        crossover_probability: f64,
        rng: &mut R,
    ) -> Schedule {
        if rng.random_range(0.0..100.0) >= crossover_probability {
            return self.clone();
        }

        assert!(
            !self.is_prototype() && !mother.is_prototype(),
            "crossover requires populated parents, not prototypes"
        );
        assert!(
            Arc::ptr_eq(&self.configuration, &mother.configuration)
                || self.reservations.len() == mother.reservations.len(),
            "parents must share a configuration"
        );

        let size = self.reservations.len();
        let mut cut = vec![false; size];
        for _ in 0..crossover_points.min(size) {
            loop {
                let p = rng.random_range(0..size);
                if !cut[p] {
                    cut[p] = true;
                    break;
                }
            }
        }

        let mut child = Self::empty(Arc::clone(&self.configuration));
        let mut first = rng.random_bool(0.5);
        for (i, class) in self.configuration.course_classes().iter().enumerate() {
            let reservation = if first {
                self.reservations[i]
            } else {
                mother.reservations[i]
            };
            child.place(class, reservation);
            if cut[i] {
                first = !first;
            }
        }

        child.calculate_fitness();
        child
    }

    /// Moves random classes to random placements.
    ///
    /// With probability `mutation_probability / 100`, repeats
    /// `mutation_size` times: pick a class, vacate its cells, draw a new
    /// reservation and occupy it. Fitness is recomputed once at the end.
    pub fn mutation<R: Rng>(
        &mut self,
        mutation_size: usize,
        mutation_probability: f64,
        rng: &mut R,
    ) {
        if rng.random_range(0.0..100.0) >= mutation_probability {
            return;
        }

        let count = self.reservations.len();
        if count == 0 {
            return;
        }

        let configuration = Arc::clone(&self.configuration);
        let rooms = configuration.number_of_rooms();
        for _ in 0..mutation_size {
            let class = &configuration.course_classes()[rng.random_range(0..count)];
            let current = self.reservations[class.id()];
            let moved = Reservation::random(class.duration(), rooms, rng);
            self.vacate(class, current);
            self.occupy(class, moved);
            self.reservations[class.id()] = moved;
        }

        debug_assert!(self.is_consistent());
        self.calculate_fitness();
    }

    /// Re-evaluates the criteria flags and fitness from the current placements.
    ///
    /// Does nothing on an empty prototype.
    pub fn calculate_fitness(&mut self) {
        let configuration = Arc::clone(&self.configuration);
        let classes = configuration.course_classes();
        if self.reservations.len() != classes.len() || classes.is_empty() {
            return;
        }

        let rooms = configuration.number_of_rooms();
        let mut score = 0usize;

        for (class, &reservation) in classes.iter().zip(&self.reservations) {
            let start = reservation.index(rooms);
            let duration = class.duration();
            let block = class.id() * CRITERIA_COUNT;

            let room_overlap = self.slots[start..start + duration]
                .iter()
                .any(|cell| cell.len() > 1);
            score = if room_overlap { 0 } else { score + 1 };
            self.criteria[block + Criterion::RoomNotOverlapping.offset()] = !room_overlap;

            let room = &configuration.rooms()[reservation.room()];

            let seats_enough = room.seats >= class.seats();
            score = if seats_enough { score + 1 } else { score / 2 };
            self.criteria[block + Criterion::SeatsEnough.offset()] = seats_enough;

            let lab_enough = !class.lab_required() || room.lab;
            score = if lab_enough { score + 1 } else { score / 2 };
            self.criteria[block + Criterion::LabEnough.offset()] = lab_enough;

            let (professor_overlap, group_overlap) =
                self.parallel_overlaps(&configuration, class, reservation);

            score = if professor_overlap { 0 } else { score + 1 };
            self.criteria[block + Criterion::ProfessorNotOverlapping.offset()] = !professor_overlap;

            score = if group_overlap { 0 } else { score + 1 };
            self.criteria[block + Criterion::GroupNotOverlapping.offset()] = !group_overlap;
        }

        self.fitness = score as f64 / (classes.len() * CRITERIA_COUNT) as f64;
    }

    /// Scans every room during the class's hours for classes sharing its
    /// professor or any of its groups. Returns `(professor, group)` overlap.
    fn parallel_overlaps(
        &self,
        configuration: &Configuration,
        class: &CourseClass,
        reservation: Reservation,
    ) -> (bool, bool) {
        let rooms = configuration.number_of_rooms();
        let classes = configuration.course_classes();
        let mut professor = false;
        let mut group = false;

        let mut t = reservation.day() * rooms * DAY_HOURS + reservation.time();
        for _ in 0..rooms {
            for cell in &self.slots[t..t + class.duration()] {
                for &other in cell {
                    if other == class.id() {
                        continue;
                    }
                    let other = &classes[other];
                    professor = professor || class.professor_overlaps(other);
                    group = group || class.groups_overlap(other);
                    if professor && group {
                        return (true, true);
                    }
                }
            }
            t += DAY_HOURS;
        }

        (professor, group)
    }

    /// Appends `class`'s reservation and occupies its cells.
    /// Classes must be placed in configuration order.
    pub(super) fn place(&mut self, class: &CourseClass, reservation: Reservation) {
        debug_assert_eq!(self.reservations.len(), class.id());
        self.occupy(class, reservation);
        self.reservations.push(reservation);
    }

    fn occupy(&mut self, class: &CourseClass, reservation: Reservation) {
        let start = reservation.index(self.configuration.number_of_rooms());
        for cell in &mut self.slots[start..start + class.duration()] {
            cell.push(class.id());
        }
    }

    fn vacate(&mut self, class: &CourseClass, reservation: Reservation) {
        let start = reservation.index(self.configuration.number_of_rooms());
        for cell in &mut self.slots[start..start + class.duration()] {
            cell.retain(|&c| c != class.id());
        }
    }

    /// Drops all placements, returning to the prototype state.
    pub(super) fn clear(&mut self) {
        for cell in &mut self.slots {
            cell.clear();
        }
        self.reservations.clear();
        self.criteria.iter_mut().for_each(|flag| *flag = false);
        self.fitness = 0.0;
    }

    /// Checks that the slot grid exactly reflects the class table.
    pub fn is_consistent(&self) -> bool {
        let classes = self.configuration.course_classes();
        let rooms = self.configuration.number_of_rooms();
        let mut seen = vec![0usize; classes.len()];

        for cell in &self.slots {
            for &c in cell {
                match seen.get_mut(c) {
                    Some(count) => *count += 1,
                    None => return false,
                }
            }
        }

        for (i, reservation) in self.reservations.iter().enumerate() {
            let duration = classes[i].duration();
            if seen[i] != duration {
                return false;
            }
            let start = reservation.index(rooms);
            let held = self.slots[start..start + duration]
                .iter()
                .all(|cell| cell.iter().filter(|&&c| c == i).count() == 1);
            if !held {
                return false;
            }
        }

        seen[self.reservations.len()..].iter().all(|&n| n == 0)
    }

    /// Fitness in `[0, 1]`; 1 means every criterion holds for every class.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The configuration this schedule places.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Shared handle to the configuration.
    pub fn configuration_arc(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Returns `true` for an empty prototype.
    pub fn is_prototype(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Placements, indexed by class id.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Placement of class `class_id`.
    pub fn reservation(&self, class_id: usize) -> Option<Reservation> {
        self.reservations.get(class_id).copied()
    }

    /// Classes paired with their placements, in configuration order.
    pub fn classes(&self) -> impl Iterator<Item = (&CourseClass, Reservation)> + '_ {
        self.configuration
            .course_classes()
            .iter()
            .zip(self.reservations.iter().copied())
    }

    /// Criteria flags, five per class (see [`Criterion`]).
    pub fn criteria(&self) -> &[bool] {
        &self.criteria
    }

    /// Whether `criterion` holds for class `class_id`.
    pub fn criterion(&self, class_id: usize, criterion: Criterion) -> bool {
        self.criteria
            .get(class_id * CRITERIA_COUNT + criterion.offset())
            .copied()
            .unwrap_or(false)
    }

    /// Class ids occupying the cell at flat index `index`.
    pub fn slot(&self, index: usize) -> &[usize] {
        &self.slots[index]
    }

    /// Number of cells in the slot grid.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Violation count per criterion, in [`Criterion::ALL`] order.
    ///
    /// Lower is better; all zeros means every class satisfies everything.
    pub fn objectives(&self) -> Vec<f64> {
        let mut violations = vec![0.0; CRITERIA_COUNT];
        if self.is_prototype() {
            return violations;
        }
        for block in self.criteria.chunks(CRITERIA_COUNT) {
            for (v, &ok) in violations.iter_mut().zip(block) {
                if !ok {
                    *v += 1.0;
                }
            }
        }
        violations
    }

    /// Number of classes placed differently in `other`.
    pub fn difference(&self, other: &Schedule) -> usize {
        self.reservations
            .iter()
            .zip(&other.reservations)
            .filter(|(a, b)| a != b)
            .count()
            + self.reservations.len().abs_diff(other.reservations.len())
    }
}

impl Chromosome for Schedule {
    type Configuration = Configuration;

    fn make_new_from_prototype<R: Rng>(&self, rng: &mut R) -> Self {
        Schedule::make_new_from_prototype(self, rng)
    }

    fn crossover<R: Rng>(
        &self,
        mother: &Self,
        crossover_points: usize,
        crossover_probability: f64,
        rng: &mut R,
    ) -> Self {
        Schedule::crossover(self, mother, crossover_points, crossover_probability, rng)
    }

    fn mutation<R: Rng>(&mut self, mutation_size: usize, mutation_probability: f64, rng: &mut R) {
        Schedule::mutation(self, mutation_size, mutation_probability, rng)
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn objectives(&self) -> Vec<f64> {
        Schedule::objectives(self)
    }

    fn difference(&self, other: &Self) -> usize {
        Schedule::difference(self, other)
    }

    fn position_len(&self) -> usize {
        Schedule::position_len(self)
    }

    fn extract_positions(&self, positions: &mut [f32]) {
        Schedule::extract_positions(self, positions)
    }

    fn update_positions(&mut self, positions: &mut [f32]) {
        Schedule::update_positions(self, positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::fixtures;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn prototype(config: Arc<Configuration>) -> Schedule {
        Schedule::new(config).expect("valid configuration")
    }

    #[test]
    fn test_new_rejects_empty_configuration() {
        assert!(Schedule::new(Arc::new(Configuration::new())).is_err());
    }

    #[test]
    fn test_prototype_is_empty() {
        let proto = prototype(fixtures::two_room());
        assert!(proto.is_prototype());
        assert_eq!(proto.slot_count(), DAYS_NUM * DAY_HOURS * 2);
        assert_eq!(proto.criteria().len(), 2 * CRITERIA_COUNT);
        assert!(proto.is_consistent());
    }

    #[test]
    fn test_make_new_places_every_class() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let s = proto.make_new_from_prototype(&mut rng);
            assert_eq!(s.reservations().len(), 10);
            assert!(s.is_consistent());
            assert!((0.0..=1.0).contains(&s.fitness()));
        }
    }

    #[test]
    fn test_perfect_single_class() {
        let proto = prototype(fixtures::single_class());
        let mut rng = create_rng(7);
        let s = proto.make_new_from_prototype(&mut rng);
        assert!((s.fitness() - 1.0).abs() < 1e-12);
        assert!(s.criteria().iter().all(|&c| c));
        assert_eq!(s.objectives(), vec![0.0; CRITERIA_COUNT]);
    }

    #[test]
    fn test_lab_violation_halves_score() {
        let proto = prototype(fixtures::two_room());
        // class 0 in A on Monday 8h, class 1 (lab) in A on Tuesday
        let s = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(1, 0, 0)]);
        assert!(!s.criterion(1, Criterion::LabEnough));
        assert!(s.criterion(1, Criterion::SeatsEnough));
        // class 0 scores 5; class 1: +1 room, +1 seats, halve (7 / 2 = 3), +1, +1
        assert!((s.fitness() - 5.0 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_room_overlap_resets_score() {
        let proto = prototype(fixtures::two_room());
        let same = Reservation::new(2, 4, 1);
        let s = proto.with_reservations(&[same, same]);
        assert!(!s.criterion(0, Criterion::RoomNotOverlapping));
        assert!(!s.criterion(1, Criterion::RoomNotOverlapping));
        assert!(!s.criterion(0, Criterion::ProfessorNotOverlapping));
        assert!(s.criterion(0, Criterion::GroupNotOverlapping));
        assert_eq!(s.slot(same.index(2)), &[0, 1]);
        assert!(s.fitness() < 0.5);
    }

    #[test]
    fn test_professor_overlap_across_rooms() {
        let proto = prototype(fixtures::two_room());
        // same hour, different rooms, same professor
        let s = proto.with_reservations(&[Reservation::new(3, 5, 0), Reservation::new(3, 5, 1)]);
        assert!(s.criterion(0, Criterion::RoomNotOverlapping));
        assert!(!s.criterion(0, Criterion::ProfessorNotOverlapping));
        assert!(!s.criterion(1, Criterion::ProfessorNotOverlapping));
        assert!(s.criterion(1, Criterion::GroupNotOverlapping));
    }

    #[test]
    fn test_optimal_two_room_placement() {
        let proto = prototype(fixtures::two_room());
        let s = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(0, 1, 1)]);
        assert!((s.fitness() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mutation_zero_probability_is_noop() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(11);
        let original = proto.make_new_from_prototype(&mut rng);
        let mut mutated = original.clone();
        for _ in 0..50 {
            mutated.mutation(5, 0.0, &mut rng);
        }
        assert_eq!(mutated.reservations(), original.reservations());
        assert_eq!(mutated.fitness(), original.fitness());
    }

    #[test]
    fn test_mutation_keeps_grid_consistent() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(12);
        let mut s = proto.make_new_from_prototype(&mut rng);
        for _ in 0..100 {
            s.mutation(3, 100.0, &mut rng);
            assert!(s.is_consistent());
            assert!((0.0..=1.0).contains(&s.fitness()));
        }
    }

    #[test]
    fn test_crossover_zero_probability_copies() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(13);
        let father = proto.make_new_from_prototype(&mut rng);
        let mother = proto.make_new_from_prototype(&mut rng);
        for _ in 0..20 {
            let child = father.crossover(&mother, 3, 0.0, &mut rng);
            assert_eq!(child.reservations(), father.reservations());
            assert_eq!(child.fitness(), father.fitness());
        }
    }

    #[test]
    fn test_crossover_takes_genes_from_parents() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(14);
        let father = proto.make_new_from_prototype(&mut rng);
        let mother = proto.make_new_from_prototype(&mut rng);
        for _ in 0..20 {
            let child = father.crossover(&mother, 2, 100.0, &mut rng);
            assert!(child.is_consistent());
            for (i, r) in child.reservations().iter().enumerate() {
                assert!(*r == father.reservations()[i] || *r == mother.reservations()[i]);
            }
        }
    }

    #[test]
    fn test_crossover_points_clamped_to_class_count() {
        let proto = prototype(fixtures::two_room());
        let mut rng = create_rng(15);
        let a = proto.make_new_from_prototype(&mut rng);
        let b = proto.make_new_from_prototype(&mut rng);
        let child = a.crossover(&b, 50, 100.0, &mut rng);
        assert_eq!(child.reservations().len(), 2);
        assert!(child.is_consistent());
    }

    #[test]
    #[should_panic(expected = "crossover requires populated parents")]
    fn test_crossover_with_prototype_panics() {
        let proto = prototype(fixtures::campus());
        let mut rng = create_rng(16);
        let father = proto.make_new_from_prototype(&mut rng);
        let _ = father.crossover(&proto, 2, 100.0, &mut rng);
    }

    #[test]
    fn test_objectives_count_violations() {
        let proto = prototype(fixtures::two_room());
        let same = Reservation::new(0, 0, 0);
        let s = proto.with_reservations(&[same, same]);
        let obj = s.objectives();
        assert_eq!(obj[Criterion::RoomNotOverlapping.offset()], 2.0);
        assert_eq!(obj[Criterion::LabEnough.offset()], 1.0);
        assert_eq!(obj[Criterion::ProfessorNotOverlapping.offset()], 2.0);
        assert_eq!(obj[Criterion::GroupNotOverlapping.offset()], 0.0);
    }

    #[test]
    fn test_difference() {
        let proto = prototype(fixtures::two_room());
        let a = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(0, 1, 1)]);
        let b = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(4, 1, 1)]);
        assert_eq!(a.difference(&a), 0);
        assert_eq!(a.difference(&b), 1);
    }

    #[test]
    fn test_pareto_dominance_via_objectives() {
        let proto = prototype(fixtures::two_room());
        let good = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(0, 1, 1)]);
        let bad = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(0, 0, 0)]);
        assert!(Chromosome::dominates(&good, &bad));
        assert!(!Chromosome::dominates(&bad, &good));
        assert!(!Chromosome::dominates(&good, &good));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_operators_preserve_grid(seed in any::<u64>(), size in 1usize..6) {
            let proto = prototype(fixtures::campus());
            let mut rng = create_rng(seed);
            let a = proto.make_new_from_prototype(&mut rng);
            let b = proto.make_new_from_prototype(&mut rng);
            let mut child = a.crossover(&b, size, 100.0, &mut rng);
            child.mutation(size, 100.0, &mut rng);
            prop_assert!(child.is_consistent());
            prop_assert!(child.fitness() >= 0.0 && child.fitness() <= 1.0);
        }
    }
}
