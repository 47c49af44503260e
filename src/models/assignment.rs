//! Assignment records and the non-blocking findings of a run.
//!
//! An assignment is the flat `(module, lecturer, role)` record handed to
//! the persistence collaborator. Warnings and data issues travel next to
//! the assignments; neither stops a commit.

use serde::{Deserialize, Serialize};

use super::{CurriculumRole, LecturerId, ModuleId, TermId};

/// The role a lecturer takes on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentRole {
    /// Term coordinator.
    Coordinator,
    /// Term team member.
    TeamMember,
    /// General-pool teaching lecturer.
    Teaching,
}

/// A lecturer placed on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    /// Module being taught.
    pub module_id: ModuleId,
    /// Lecturer placed on the module.
    pub lecturer_id: LecturerId,
    /// Role on the module.
    pub role: AssignmentRole,
}

/// A per-term shortage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Affected term.
    pub term: TermId,
    /// What went short.
    pub kind: WarningKind,
    /// Teaching lecturers missing against the term's need.
    pub shortfall_count: usize,
    /// Teaching lecturers missing against the apportioned share.
    #[serde(default)]
    pub share_shortfall: usize,
    /// Required tags no lecturer placed on the term covers.
    pub unmatched_expertise_tags: Vec<String>,
}

/// Classification of shortages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The term had demand but no expertise-matched candidate at all.
    NoCandidates,
    /// Candidates existed but fewer teaching lecturers were placed than needed.
    Underfilled,
}

/// A data-integrity problem found in the input.
///
/// The affected role assignment is skipped; the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIssue {
    /// Issue category.
    pub kind: DataIssueKind,
    /// Lecturer the record belongs to, if known.
    pub lecturer_id: Option<LecturerId>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of data issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataIssueKind {
    /// A role names a course that does not exist.
    UnknownCourse,
    /// A role's term disagrees with its course's term.
    TermMismatch,
    /// A role row names a lecturer that does not exist.
    UnknownLecturer,
    /// A role row carries an unrecognized role label.
    UnknownRole,
    /// A second coordinator was declared for a term and not selected.
    ExtraCoordinator,
}

impl From<CurriculumRole> for AssignmentRole {
    fn from(role: CurriculumRole) -> Self {
        match role {
            CurriculumRole::Coordinator => AssignmentRole::Coordinator,
            CurriculumRole::TeamMember => AssignmentRole::TeamMember,
        }
    }
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(module_id: ModuleId, lecturer_id: LecturerId, role: AssignmentRole) -> Self {
        Self {
            module_id,
            lecturer_id,
            role,
        }
    }

    /// Creates a teaching assignment.
    pub fn teaching(module_id: ModuleId, lecturer_id: LecturerId) -> Self {
        Self::new(module_id, lecturer_id, AssignmentRole::Teaching)
    }
}

impl DataIssue {
    /// Creates a data issue.
    pub fn new(
        kind: DataIssueKind,
        lecturer_id: Option<LecturerId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            lecturer_id,
            message: message.into(),
        }
    }
}
