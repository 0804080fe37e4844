//! Problem instance.
//!
//! [`Configuration`] owns every entity of one timetabling problem plus the
//! ordered list of classes to place. It is assembled up front, validated
//! on every insertion, and shared read-only (behind an `Arc`) by all
//! schedules of one or more runs.

use std::collections::BTreeMap;

use super::{Course, CourseClass, Professor, Room, StudentsGroup, DAY_HOURS};
use crate::error::{Result, TimetableError};

/// Description of a class before its references are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSpec {
    /// Teaching professor id.
    pub professor: u32,
    /// Course id.
    pub course: u32,
    /// Attending student group ids.
    pub groups: Vec<u32>,
    /// Duration in hours.
    pub duration: usize,
    /// Whether a lab room is required.
    pub lab: bool,
}

impl ClassSpec {
    /// Creates a one-hour class without lab requirement.
    pub fn new(professor: u32, course: u32) -> Self {
        Self {
            professor,
            course,
            groups: Vec::new(),
            duration: 1,
            lab: false,
        }
    }

    /// Adds an attending group.
    pub fn with_group(mut self, group: u32) -> Self {
        self.groups.push(group);
        self
    }

    /// Sets the duration in hours.
    pub fn with_duration(mut self, hours: usize) -> Self {
        self.duration = hours;
        self
    }

    /// Sets the lab requirement.
    pub fn with_lab(mut self, lab: bool) -> Self {
        self.lab = lab;
        self
    }
}

/// A complete timetabling problem instance.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ClassSpec, Configuration, Course, Professor, StudentsGroup};
///
/// let mut config = Configuration::new();
/// config.add_professor(Professor::new(1, "Ada"));
/// config.add_course(Course::new(1, "Algorithms"));
/// config.add_group(StudentsGroup::new(1, "CS-1", 25));
/// config.add_room("R101", false, 30);
///
/// let id = config
///     .add_class(ClassSpec::new(1, 1).with_group(1).with_duration(2))
///     .unwrap();
/// assert_eq!(config.course_classes()[id].seats(), 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    professors: BTreeMap<u32, Professor>,
    courses: BTreeMap<u32, Course>,
    groups: BTreeMap<u32, StudentsGroup>,
    rooms: Vec<Room>,
    classes: Vec<CourseClass>,
}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a professor, replacing any previous one with the same id.
    pub fn add_professor(&mut self, professor: Professor) {
        self.professors.insert(professor.id, professor);
    }

    /// Registers a course, replacing any previous one with the same id.
    pub fn add_course(&mut self, course: Course) {
        self.courses.insert(course.id, course);
    }

    /// Registers a student group, replacing any previous one with the same id.
    pub fn add_group(&mut self, group: StudentsGroup) {
        self.groups.insert(group.id, group);
    }

    /// Adds a room and returns its sequential id.
    pub fn add_room(&mut self, name: impl Into<String>, lab: bool, seats: u32) -> usize {
        let id = self.rooms.len();
        self.rooms.push(Room {
            id,
            name: name.into(),
            lab,
            seats,
        });
        id
    }

    /// Resolves `spec` and appends the class, returning its sequential id.
    ///
    /// # Errors
    ///
    /// Fails on an unknown professor, course or group id, when the
    /// duration is zero or longer than a teaching day, or when the groups'
    /// combined size overflows. A rejected class is never partially added.
    pub fn add_class(&mut self, spec: ClassSpec) -> Result<usize> {
        if !self.professors.contains_key(&spec.professor) {
            return Err(TimetableError::UnknownProfessor { id: spec.professor });
        }
        if !self.courses.contains_key(&spec.course) {
            return Err(TimetableError::UnknownCourse { id: spec.course });
        }
        if spec.duration == 0 || spec.duration > DAY_HOURS {
            return Err(TimetableError::InvalidDuration {
                duration: spec.duration,
                max: DAY_HOURS,
            });
        }

        let mut group_ids = spec.groups;
        group_ids.sort_unstable();
        group_ids.dedup();

        let mut seats = 0u32;
        for id in &group_ids {
            let group = self
                .groups
                .get(id)
                .ok_or(TimetableError::UnknownGroup { id: *id })?;
            seats = match seats.checked_add(group.size) {
                Some(total) => total,
                None => {
                    return Err(TimetableError::SeatOverflow {
                        groups: group_ids.clone(),
                    })
                }
            };
        }

        let id = self.classes.len();
        self.classes.push(CourseClass::new(
            id,
            spec.professor,
            spec.course,
            group_ids,
            spec.duration,
            spec.lab,
            seats,
        ));
        Ok(id)
    }

    /// Checks that the instance can be scheduled at all.
    ///
    /// # Errors
    ///
    /// Fails when there are no rooms or no classes.
    pub fn validate(&self) -> Result<()> {
        if self.rooms.is_empty() {
            return Err(TimetableError::EmptyConfiguration { what: "rooms" });
        }
        if self.classes.is_empty() {
            return Err(TimetableError::EmptyConfiguration { what: "classes" });
        }
        Ok(())
    }

    /// Returns the room with the given id.
    pub fn room(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// All rooms, indexed by id.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns the professor with the given id.
    pub fn professor(&self, id: u32) -> Option<&Professor> {
        self.professors.get(&id)
    }

    /// Returns the course with the given id.
    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Returns the student group with the given id.
    pub fn group(&self, id: u32) -> Option<&StudentsGroup> {
        self.groups.get(&id)
    }

    /// Classes to place, in registration order.
    pub fn course_classes(&self) -> &[CourseClass] {
        &self.classes
    }

    /// Number of rooms.
    pub fn number_of_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Number of classes to place.
    pub fn number_of_course_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of registered professors.
    pub fn number_of_professors(&self) -> usize {
        self.professors.len()
    }

    /// Number of registered courses.
    pub fn number_of_courses(&self) -> usize {
        self.courses.len()
    }

    /// Number of registered student groups.
    pub fn number_of_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.professors.is_empty()
            && self.courses.is_empty()
            && self.groups.is_empty()
            && self.rooms.is_empty()
            && self.classes.is_empty()
    }
}
