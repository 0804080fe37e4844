//! Export record handed to rendering layers.

use super::chromosome::Schedule;
use super::criteria::{Criterion, CRITERIA_COUNT};

/// One class's placement with names resolved for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassPlacement {
    /// Sequential class id assigned by the configuration.
    pub class_id: usize,
    /// Id of the course taught.
    pub course_id: u32,
    /// Course name, empty if the course is unknown.
    pub course: String,
    /// Id of the teaching professor.
    pub professor_id: u32,
    /// Professor name, empty if the professor is unknown.
    pub professor: String,
    /// Attending student groups, ascending.
    pub group_ids: Vec<u32>,
    /// Zero-based day of the week.
    pub day: usize,
    /// Zero-based start hour within the day.
    pub time: usize,
    /// Length of the class in hours.
    pub duration: usize,
    /// Sequential id of the assigned room.
    pub room_id: usize,
    /// Name of the assigned room.
    pub room: String,
    /// Whether the class needs a lab room.
    pub lab_required: bool,
    /// Flags in [`Criterion::ALL`] order.
    pub criteria: [bool; CRITERIA_COUNT],
}

impl ClassPlacement {
    /// Whether every criterion holds for this class.
    pub fn is_satisfied(&self) -> bool {
        self.criteria.iter().all(|&c| c)
    }

    /// Flag for a single criterion.
    pub fn criterion(&self, criterion: Criterion) -> bool {
        self.criteria[criterion.offset()]
    }
}

/// Snapshot of a schedule for HTML/JSON renderers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleReport {
    /// Fitness of the schedule, in `[0, 1]`.
    pub fitness: f64,
    /// One entry per class, in class id order.
    pub classes: Vec<ClassPlacement>,
}

impl ScheduleReport {
    /// Placements starting on `day`, ordered by start hour then room.
    pub fn day(&self, day: usize) -> Vec<&ClassPlacement> {
        let mut entries: Vec<&ClassPlacement> =
            self.classes.iter().filter(|c| c.day == day).collect();
        entries.sort_by_key(|c| (c.time, c.room_id));
        entries
    }

    /// Number of classes with at least one violated criterion.
    pub fn violations(&self) -> usize {
        self.classes.iter().filter(|c| !c.is_satisfied()).count()
    }
}

impl Schedule {
    /// Builds a display snapshot of the current placements.
    pub fn report(&self) -> ScheduleReport {
        let configuration = self.configuration();
        let classes = self
            .classes()
            .map(|(class, reservation)| {
                let mut criteria = [false; CRITERIA_COUNT];
                for c in Criterion::ALL {
                    criteria[c.offset()] = self.criterion(class.id(), c);
                }
                ClassPlacement {
                    class_id: class.id(),
                    course_id: class.course_id(),
                    course: configuration
                        .course(class.course_id())
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    professor_id: class.professor_id(),
                    professor: configuration
                        .professor(class.professor_id())
                        .map(|p| p.name.clone())
                        .unwrap_or_default(),
                    group_ids: class.group_ids().to_vec(),
                    day: reservation.day(),
                    time: reservation.time(),
                    duration: class.duration(),
                    room_id: reservation.room(),
                    room: configuration
                        .room(reservation.room())
                        .map(|r| r.name.clone())
                        .unwrap_or_default(),
                    lab_required: class.lab_required(),
                    criteria,
                }
            })
            .collect();

        ScheduleReport {
            fitness: self.fitness(),
            classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::schedule::{fixtures, Reservation};

    #[test]
    fn test_report_resolves_names() {
        let proto = Schedule::new(fixtures::two_room()).unwrap();
        let s = proto.with_reservations(&[Reservation::new(1, 2, 0), Reservation::new(1, 0, 1)]);
        let report = s.report();

        assert_eq!(report.classes.len(), 2);
        assert_eq!(report.fitness, s.fitness());
        assert_eq!(report.classes[0].course, "Algorithms");
        assert_eq!(report.classes[0].professor, "Ada");
        assert_eq!(report.classes[1].room, "B");
        assert!(report.classes[1].lab_required);
        assert_eq!(report.violations(), 0);

        let tuesday = report.day(1);
        assert_eq!(tuesday.len(), 2);
        assert_eq!(tuesday[0].class_id, 1);
    }

    #[test]
    fn test_report_flags_violations() {
        let proto = Schedule::new(fixtures::two_room()).unwrap();
        let s = proto.with_reservations(&[Reservation::new(0, 0, 0), Reservation::new(0, 0, 0)]);
        let report = s.report();
        assert_eq!(report.violations(), 2);
        assert!(!report.classes[1].criterion(Criterion::LabEnough));
    }

    #[test]
    fn test_prototype_report_is_empty() {
        let proto = Schedule::new(fixtures::two_room()).unwrap();
        assert!(proto.report().classes.is_empty());
    }

    #[test]
    fn test_report_orders_classes_and_groups() {
        let proto = Schedule::new(fixtures::campus()).unwrap();
        let mut rng = create_rng(5);
        let report = proto.make_new_from_prototype(&mut rng).report();

        assert_eq!(report.classes.len(), 10);
        assert!(report.classes.iter().enumerate().all(|(i, c)| c.class_id == i));
        assert!(report
            .classes
            .iter()
            .all(|c| c.group_ids.windows(2).all(|w| w[0] < w[1])));
        assert_eq!(report.classes[2].group_ids, vec![1, 2]);
        assert!((0.0..=1.0).contains(&report.fitness));
    }
}
