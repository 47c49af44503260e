//! Curriculum model: courses, modules and small groups.
//!
//! A course runs in one term and is split into modules (lessons or problem
//! sets). Each module needs lecturers. Small groups are the student cohorts
//! of a term; their count, not their size, drives demand.

use serde::{Deserialize, Serialize};

/// Academic term (semester) number.
pub type TermId = u32;

/// Module identifier, as issued by the persistence collaborator.
pub type ModuleId = u64;

/// A course offered in a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Term in which the course runs.
    pub term: TermId,
    /// Skill tags a lecturer should cover. Duplicates are kept.
    pub required_expertise: Vec<String>,
    /// Blok number (cross-cutting grouping label).
    pub blok: u32,
}

/// One teaching unit of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier.
    pub id: ModuleId,
    /// Module number within its course.
    pub ordinal: u32,
}

/// A named student cohort within a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallGroup {
    /// Term the group belongs to.
    pub term: TermId,
    /// Group name, unique within the term.
    pub group_name: String,
}

impl Course {
    /// Creates a course with no required expertise in blok 0.
    pub fn new(code: impl Into<String>, term: TermId) -> Self {
        Self {
            code: code.into(),
            term,
            required_expertise: Vec::new(),
            blok: 0,
        }
    }

    /// Adds a required expertise tag.
    pub fn with_expertise(mut self, tag: impl Into<String>) -> Self {
        self.required_expertise.push(tag.into());
        self
    }

    /// Sets the blok number.
    pub fn with_blok(mut self, blok: u32) -> Self {
        self.blok = blok;
        self
    }
}

impl Module {
    /// Creates a module.
    pub fn new(id: ModuleId, ordinal: u32) -> Self {
        Self { id, ordinal }
    }
}

impl SmallGroup {
    /// Creates a small group.
    pub fn new(term: TermId, group_name: impl Into<String>) -> Self {
        Self {
            term,
            group_name: group_name.into(),
        }
    }
}
