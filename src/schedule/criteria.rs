//! Per-class satisfaction criteria.

/// Number of criteria evaluated per class.
pub const CRITERIA_COUNT: usize = 5;

/// One of the five constraints checked for every placed class.
///
/// The discriminant is the offset of the flag inside a class's block of
/// the criteria vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// No other class shares any of the class's room hours.
    RoomNotOverlapping = 0,
    /// The room seats at least the attending students.
    SeatsEnough = 1,
    /// The room is a lab whenever the class needs one.
    LabEnough = 2,
    /// The professor teaches nothing else during the class.
    ProfessorNotOverlapping = 3,
    /// No attending group has another class at the same time.
    GroupNotOverlapping = 4,
}

impl Criterion {
    /// All criteria in evaluation order.
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::RoomNotOverlapping,
        Criterion::SeatsEnough,
        Criterion::LabEnough,
        Criterion::ProfessorNotOverlapping,
        Criterion::GroupNotOverlapping,
    ];

    /// Offset within a class's criteria block.
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Short label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::RoomNotOverlapping => "room",
            Criterion::SeatsEnough => "seats",
            Criterion::LabEnough => "lab",
            Criterion::ProfessorNotOverlapping => "professor",
            Criterion::GroupNotOverlapping => "groups",
        }
    }
}
