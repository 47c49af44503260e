//! Lecturer model.
//!
//! Lecturers are the resources being allocated. Each carries free-form
//! expertise tags and the curriculum roles declared for them upstream.
//! Role declarations are authoritative: the allocator never creates or
//! removes them.

use serde::{Deserialize, Serialize};

use super::TermId;

/// Lecturer identifier.
pub type LecturerId = u64;

/// A lecturer available to the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Unique lecturer identifier.
    pub id: LecturerId,
    /// Display name.
    pub name: String,
    /// Expertise tags.
    pub expertise: Vec<String>,
    /// Curriculum roles declared for this lecturer.
    #[serde(default)]
    pub role_assignments: Vec<RoleAssignment>,
}

/// A declared curriculum role for one course in one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Term of the role.
    pub term: TermId,
    /// Course the role is declared for.
    pub course_code: String,
    /// The role itself.
    pub role: CurriculumRole,
}

/// Pre-declared curriculum roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurriculumRole {
    /// One per term; assigned to every module of the term.
    Coordinator,
    /// Any number per term; assigned to every module of the term.
    TeamMember,
}

impl Lecturer {
    /// Creates a lecturer with no expertise and no roles.
    pub fn new(id: LecturerId) -> Self {
        Self {
            id,
            name: String::new(),
            expertise: Vec::new(),
            role_assignments: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an expertise tag.
    pub fn with_expertise(mut self, tag: impl Into<String>) -> Self {
        self.expertise.push(tag.into());
        self
    }

    /// Declares a coordinator role.
    pub fn with_coordinator(mut self, term: TermId, course_code: impl Into<String>) -> Self {
        self.role_assignments.push(RoleAssignment::new(
            term,
            course_code,
            CurriculumRole::Coordinator,
        ));
        self
    }

    /// Declares a team member role.
    pub fn with_team_member(mut self, term: TermId, course_code: impl Into<String>) -> Self {
        self.role_assignments.push(RoleAssignment::new(
            term,
            course_code,
            CurriculumRole::TeamMember,
        ));
        self
    }

    /// Whether this lecturer holds any curriculum role, in any term.
    ///
    /// Such lecturers are never part of the general-teaching pool.
    pub fn holds_any_role(&self) -> bool {
        !self.role_assignments.is_empty()
    }
}

impl RoleAssignment {
    /// Creates a role assignment.
    pub fn new(term: TermId, course_code: impl Into<String>, role: CurriculumRole) -> Self {
        Self {
            term,
            course_code: course_code.into(),
            role,
        }
    }
}
