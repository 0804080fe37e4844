//! Course class: the unit placed on the timetable.

/// One class to be placed on the timetable.
///
/// Binds a professor, a course and a set of student groups, together with
/// the room requirements (duration, lab, seats). Created only through
/// [`Configuration::add_class`](super::Configuration::add_class), which
/// assigns the sequential id and resolves all references.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CourseClass {
    id: usize,
    professor_id: u32,
    course_id: u32,
    group_ids: Vec<u32>,
    duration: usize,
    lab_required: bool,
    seats: u32,
}

impl CourseClass {
    /// `group_ids` must be sorted and deduplicated.
    pub(crate) fn new(
        id: usize,
        professor_id: u32,
        course_id: u32,
        group_ids: Vec<u32>,
        duration: usize,
        lab_required: bool,
        seats: u32,
    ) -> Self {
        debug_assert!(group_ids.windows(2).all(|w| w[0] < w[1]));
        Self {
            id,
            professor_id,
            course_id,
            group_ids,
            duration,
            lab_required,
            seats,
        }
    }

    /// Sequential class id, also the class index in the configuration.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Id of the teaching professor.
    pub fn professor_id(&self) -> u32 {
        self.professor_id
    }

    /// Id of the course this class belongs to.
    pub fn course_id(&self) -> u32 {
        self.course_id
    }

    /// Attending student groups, ascending by id.
    pub fn group_ids(&self) -> &[u32] {
        &self.group_ids
    }

    /// Duration in hours (at least 1).
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Whether the class needs a lab room.
    pub fn lab_required(&self) -> bool {
        self.lab_required
    }

    /// Seats required: the summed size of all attending groups.
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// Returns `true` if both classes are taught by the same professor.
    pub fn professor_overlaps(&self, other: &CourseClass) -> bool {
        self.professor_id == other.professor_id
    }

    /// Returns `true` if the classes share at least one student group.
    pub fn groups_overlap(&self, other: &CourseClass) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.group_ids.len() && j < other.group_ids.len() {
            match self.group_ids[i].cmp(&other.group_ids[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }
}
