//! Leaf entities: courses, professors, student groups, rooms.

/// A course (subject) that classes belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// Course identifier.
    pub id: u32,
    /// Course name.
    pub name: String,
}

impl Course {
    /// Creates a course.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A professor teaching one or more classes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Professor {
    /// Professor identifier.
    pub id: u32,
    /// Professor name.
    pub name: String,
}

impl Professor {
    /// Creates a professor.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A group of students attending classes together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentsGroup {
    /// Group identifier.
    pub id: u32,
    /// Group name.
    pub name: String,
    /// Number of students in the group.
    pub size: u32,
}

impl StudentsGroup {
    /// Creates a student group.
    pub fn new(id: u32, name: impl Into<String>, size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            size,
        }
    }
}

/// A classroom.
///
/// Room ids are assigned by [`Configuration::add_room`](super::Configuration::add_room)
/// and equal the room coordinate used by reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Sequential room identifier.
    pub id: usize,
    /// Room name.
    pub name: String,
    /// Whether the room is equipped with computers.
    pub lab: bool,
    /// Seat capacity.
    pub seats: u32,
}
